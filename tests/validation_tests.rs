//! Tests for prompt sanitisation and validation.

#![ cfg( feature = "input_validation" ) ]

use promptforge_core::validation::{ sanitize_and_validate_prompt, sanitize_prompt, validate_category, validate_prompt, MAX_PROMPT_LENGTH };

#[ test ]
fn validate_prompt_rejects_empty()
{
  let result = validate_prompt( "" );
  assert!( result.is_err() );
}

#[ test ]
fn validate_prompt_rejects_whitespace_only()
{
  let result = validate_prompt( "   \n\t  " );
  assert!( result.is_err() );
}

#[ test ]
fn validate_prompt_rejects_over_length()
{
  let too_long = "a".repeat( MAX_PROMPT_LENGTH + 1 );
  let result = validate_prompt( &too_long );
  assert!( result.is_err() );
}

#[ test ]
fn validate_prompt_accepts_in_range_text()
{
  assert!( validate_prompt( "write a haiku about rust" ).is_ok() );
}

#[ test ]
fn sanitize_prompt_strips_forbidden_control_characters()
{
  let dirty = "hello\u{0007}world\u{001F}!";
  let clean = sanitize_prompt( dirty );
  assert_eq!( clean, "helloworld!" );
}

#[ test ]
fn sanitize_prompt_preserves_tab_and_newline()
{
  let text = "line one\n\tindented";
  assert_eq!( sanitize_prompt( text ), text );
}

#[ test ]
fn sanitize_prompt_collapses_long_blank_runs_to_two_newlines()
{
  let dirty = "first\n\n\n\n\nsecond";
  assert_eq!( sanitize_prompt( dirty ), "first\n\nsecond" );
}

#[ test ]
fn sanitize_prompt_truncates_over_length_text_at_a_word_boundary()
{
  let long = format!( "{} trailing", "word ".repeat( MAX_PROMPT_LENGTH ) );
  let result = sanitize_prompt( &long );

  assert!( result.ends_with( "..." ) );
  assert!( result.chars().count() <= MAX_PROMPT_LENGTH + 3 );
}

#[ test ]
fn sanitize_prompt_of_empty_input_is_empty()
{
  assert_eq!( sanitize_prompt( "   " ), "" );
}

#[ test ]
fn validate_category_accepts_case_insensitive_and_dash_or_underscore()
{
  assert!( validate_category( "build-agent" ).is_ok() );
  assert!( validate_category( "BUILD_AGENT" ).is_ok() );
  assert!( validate_category( "Creative" ).is_ok() );
}

#[ test ]
fn validate_category_rejects_unknown_values()
{
  assert!( validate_category( "not_a_real_category" ).is_err() );
}

#[ test ]
fn validate_category_rejects_empty()
{
  assert!( validate_category( "   " ).is_err() );
}

#[ test ]
fn sanitize_and_validate_prompt_trims_and_validates()
{
  let result = sanitize_and_validate_prompt( "  write something useful  " ).unwrap();
  assert_eq!( result, "write something useful" );
}

#[ test ]
fn sanitize_and_validate_prompt_rejects_whitespace_only_input()
{
  assert!( sanitize_and_validate_prompt( "    " ).is_err() );
}
