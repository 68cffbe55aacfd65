//! Tests for extracting a quality score and a redesigned prompt out of
//! free-form role output text.

use promptforge_core::parser::{ extract_optimized_prompt, extract_score, try_extract_score, DEFAULT_SCORE };

#[ test ]
fn try_extract_score_reads_total_score_phrasing()
{
  assert_eq!( try_extract_score( "Total Score: 87" ), Some( 87 ) );
}

#[ test ]
fn try_extract_score_reads_slash_100_phrasing()
{
  assert_eq!( try_extract_score( "I'd rate this an 82/100 overall." ), Some( 82 ) );
}

#[ test ]
fn try_extract_score_reads_bare_score_phrasing()
{
  assert_eq!( try_extract_score( "score: 60" ), Some( 60 ) );
}

#[ test ]
fn try_extract_score_is_none_when_nothing_matches()
{
  assert_eq!( try_extract_score( "no numeric assessment here" ), None );
}

#[ test ]
fn try_extract_score_clamps_above_100()
{
  assert_eq!( try_extract_score( "Final Score: 150" ), Some( 100 ) );
}

#[ test ]
fn extract_score_falls_back_to_default()
{
  assert_eq!( extract_score( "nothing useful" ), DEFAULT_SCORE );
}

#[ test ]
fn extract_optimized_prompt_collects_lines_after_a_marker()
{
  let text = "\
Here is my analysis.

Optimized Prompt:
Write a haiku about the ocean.
Use vivid imagery.

Explanation: I added imagery guidance.
";

  let result = extract_optimized_prompt( text );
  assert_eq!( result, "Write a haiku about the ocean.\nUse vivid imagery.\nExplanation: I added imagery guidance." );
}

#[ test ]
fn extract_optimized_prompt_stops_at_a_heading_boundary()
{
  let text = "\
Improved Prompt:
Describe a sunset in three sentences.

## Notes
Irrelevant commentary.
";

  let result = extract_optimized_prompt( text );
  assert_eq!( result, "Describe a sunset in three sentences." );
}

#[ test ]
fn extract_optimized_prompt_falls_back_to_longest_paragraph_without_a_marker()
{
  let short = "Too short.";
  let long = "This paragraph is long enough to count as a substantive block of redesigned prompt text for the fallback path.";
  let text = format!( "{short}\n\n{long}" );

  let result = extract_optimized_prompt( &text );
  assert_eq!( result, long );
}

#[ test ]
fn extract_optimized_prompt_falls_back_to_a_character_budget_as_a_last_resort()
{
  let text = "short";
  assert_eq!( extract_optimized_prompt( text ), "short" );
}
