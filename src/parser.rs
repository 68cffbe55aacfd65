mod private
{
  use std::sync::OnceLock;
  use regex::Regex;

  /// Default quality score when no parseable score is present in the
  /// Evaluator's output (§4.8).
  pub const DEFAULT_SCORE : u8 = 75;

  /// Minimum non-whitespace length for a paragraph to count as
  /// "substantive" in the optimized-prompt fallback (§4.8 supplement).
  const SUBSTANTIVE_MIN_CHARS : usize = 50;

  /// Character budget for the last-resort optimized-prompt fallback.
  const FALLBACK_CHAR_BUDGET : usize = 500;

  fn score_patterns() -> &'static Vec< Regex >
  {
    static CELL : OnceLock< Vec< Regex > > = OnceLock::new();
    CELL.get_or_init( ||
    {
      [
        r"(?i)(?:total|overall|final|quality)\s*(?:score)?[:\s]+(\d+)",
        r"(\d+)\s*/\s*100",
        r"(?i)score[:\s]+(\d+)",
      ]
      .iter()
      .map( |p| Regex::new( p ).expect( "static pattern is valid regex" ) )
      .collect()
    } )
  }

  fn optimized_prompt_markers() -> &'static [ &'static str ]
  {
    &[ "optimized prompt", "improved prompt", "refined prompt" ]
  }

  fn explanation_markers() -> &'static [ &'static str ]
  {
    &[ "explanation", "improvements", "key changes" ]
  }

  /// Tries each pattern in order and returns the first clamped match, or
  /// `None` if nothing matches. The basis for [`extract_score`]; exposed
  /// separately so callers can tell a genuine 75 from a defaulted one and
  /// emit the "quality_score defaulted" warning (§8 scenario 4).
  #[ must_use ]
  pub fn try_extract_score( text : &str ) -> Option< u8 >
  {
    for pattern in score_patterns()
    {
      if let Some( captures ) = pattern.captures( text )
      {
        if let Some( raw ) = captures.get( 1 )
        {
          if let Ok( score ) = raw.as_str().parse::< u32 >()
          {
            return Some( u8::try_from( score.min( 100 ) ).unwrap_or( 100 ) );
          }
        }
      }
    }
    None
  }

  /// Extracts the Evaluator's quality score from free-form text (§4.8).
  /// Tries each pattern in order; the first match wins and is clamped to
  /// `[0,100]`. Returns `DEFAULT_SCORE` when nothing matches. Total: never
  /// fails.
  #[ must_use ]
  pub fn extract_score( text : &str ) -> u8
  {
    try_extract_score( text ).unwrap_or( DEFAULT_SCORE )
  }

  /// Extracts the redesigned prompt from the Designer's free-form output
  /// (§4.8). Looks for a case-insensitive marker line, collects the lines
  /// that follow until an explanation marker or a fence/heading boundary,
  /// then falls back to the longest substantive `\n\n`-delimited paragraph,
  /// then to the first `FALLBACK_CHAR_BUDGET` characters. Total: never
  /// fails.
  #[ must_use ]
  pub fn extract_optimized_prompt( text : &str ) -> String
  {
    let mut in_prompt = false;
    let mut collected : Vec< &str > = Vec::new();

    for line in text.lines()
    {
      let lower = line.to_lowercase();

      if !in_prompt && optimized_prompt_markers().iter().any( |m| lower.contains( m ) )
      {
        in_prompt = true;
        continue;
      }

      if !in_prompt
      {
        continue;
      }

      let trimmed = line.trim();

      if trimmed.starts_with( '#' ) || trimmed.starts_with( "```" )
      {
        if !collected.is_empty()
        {
          break;
        }
        continue;
      }

      if trimmed.is_empty()
      {
        continue;
      }

      collected.push( line );

      if explanation_markers().iter().any( |m| lower.contains( m ) )
      {
        break;
      }
    }

    if !collected.is_empty()
    {
      return collected.join( "\n" ).trim().to_string();
    }

    let longest_substantive = text
      .split( "\n\n" )
      .map( str::trim )
      .filter( |p| p.chars().filter( |c| !c.is_whitespace() ).count() > SUBSTANTIVE_MIN_CHARS )
      .max_by_key( |p| p.len() );

    if let Some( paragraph ) = longest_substantive
    {
      return paragraph.to_string();
    }

    text.chars().take( FALLBACK_CHAR_BUDGET ).collect()
  }
}

crate::mod_interface!
{
  exposed use
  {
    DEFAULT_SCORE,
    try_extract_score,
    extract_score,
    extract_optimized_prompt,
  };
}
