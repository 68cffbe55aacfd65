//! Tests for the category enumeration and pipeline configuration defaults.

use promptforge_core::config::{ Category, PipelineConfig };

#[ test ]
fn category_parse_is_case_insensitive()
{
  assert_eq!( Category::parse( "creative" ).unwrap(), Category::Creative );
  assert_eq!( Category::parse( "CREATIVE" ).unwrap(), Category::Creative );
  assert_eq!( Category::parse( "Creative" ).unwrap(), Category::Creative );
}

#[ test ]
fn category_parse_treats_dash_and_underscore_interchangeably()
{
  assert_eq!( Category::parse( "build-agent" ).unwrap(), Category::BuildAgent );
  assert_eq!( Category::parse( "build_agent" ).unwrap(), Category::BuildAgent );
  assert_eq!( Category::parse( "BUILD-AGENT" ).unwrap(), Category::BuildAgent );
}

#[ test ]
fn category_parse_rejects_unknown_values()
{
  assert!( Category::parse( "not_a_category" ).is_err() );
}

#[ test ]
fn category_canonical_name_round_trips_through_parse()
{
  let all = [
    Category::Creative, Category::Technical, Category::Analytical, Category::Marketing,
    Category::Educational, Category::BuildAgent, Category::SystemPrompt,
    Category::CodeGeneration, Category::Documentation,
  ];

  for category in all
  {
    let name = category.canonical_name();
    assert_eq!( Category::parse( name ).unwrap(), category );
  }
}

#[ test ]
fn pipeline_config_default_marks_build_agent_and_system_prompt_as_always_parallel()
{
  let config = PipelineConfig::default();
  assert!( config.parallel_categories.contains( &Category::BuildAgent ) );
  assert!( config.parallel_categories.contains( &Category::SystemPrompt ) );
  assert!( !config.parallel_categories.contains( &Category::Creative ) );
}

#[ test ]
fn pipeline_config_default_matches_documented_tunables()
{
  let config = PipelineConfig::default();
  assert_eq!( config.parallel_length_threshold, 500 );
  assert_eq!( config.sample_evaluate_max_attempts, 2 );
  assert_eq!( config.circuit_failure_threshold, 5 );
  assert_eq!( config.circuit_success_threshold, 2 );
  assert_eq!( config.circuit_open_timeout, std::time::Duration::from_secs( 60 ) );
}
