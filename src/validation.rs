mod private
{
  use crate::config::Category;
  use crate::error::{ CoreError, Result };

  /// Maximum characters accepted in a raw prompt, after sanitisation.
  pub const MAX_PROMPT_LENGTH : usize = 10_000;

  /// Minimum characters accepted in a raw prompt, after sanitisation.
  pub const MIN_PROMPT_LENGTH : usize = 1;

  /// Strips forbidden control characters, collapses runs of blank lines, and
  /// truncates to `MAX_PROMPT_LENGTH` at a word boundary when over length.
  ///
  /// Mirrors `[0x00-0x08, 0x0B-0x0C, 0x0E-0x1F, 0x7F]` removal and the `\n{3,}`
  /// -> `\n\n` collapse (§4.10); never fails.
  #[ must_use ]
  pub fn sanitize_prompt( prompt : &str ) -> String
  {
    let trimmed = prompt.trim();
    if trimmed.is_empty()
    {
      return String::new();
    }

    let stripped : String = trimmed.chars()
      .filter( |&c| !is_forbidden_control( c ) )
      .collect();

    let collapsed = collapse_blank_runs( &stripped );

    if collapsed.chars().count() > MAX_PROMPT_LENGTH
    {
      truncate_at_word_boundary( &collapsed )
    }
    else
    {
      collapsed
    }
  }

  fn is_forbidden_control( c : char ) -> bool
  {
    let code = c as u32;
    matches!( code, 0x00..=0x08 | 0x0B..=0x0C | 0x0E..=0x1F | 0x7F )
  }

  fn collapse_blank_runs( text : &str ) -> String
  {
    let mut result = String::with_capacity( text.len() );
    let mut newline_run = 0usize;

    for c in text.chars()
    {
      if c == '\n'
      {
        newline_run += 1;
        if newline_run <= 2
        {
          result.push( c );
        }
      }
      else
      {
        newline_run = 0;
        result.push( c );
      }
    }

    result
  }

  fn truncate_at_word_boundary( text : &str ) -> String
  {
    let chars : Vec< char > = text.chars().collect();
    let cut_at = MAX_PROMPT_LENGTH.min( chars.len() );
    let truncated : String = chars[ ..cut_at ].iter().collect();

    let last_space = truncated.rfind( ' ' );
    let boundary_floor = ( MAX_PROMPT_LENGTH as f64 * 0.9 ) as usize;

    match last_space
    {
      Some( idx ) if idx > boundary_floor => format!( "{}...", &truncated[ ..idx ] ),
      _ => format!( "{truncated}..." ),
    }
  }

  /// Validates a (already-sanitised or raw) prompt's length and content.
  ///
  /// # Errors
  ///
  /// Returns `CoreError::Validation` with a corrective, user-facing message
  /// when the prompt is empty, whitespace-only, or outside the length bounds.
  pub fn validate_prompt( prompt : &str ) -> Result< () >
  {
    if prompt.is_empty()
    {
      return Err( CoreError::Validation( "Prompt cannot be empty".to_string() ).into() );
    }

    if prompt.trim().is_empty()
    {
      return Err( CoreError::Validation( "Prompt cannot be only whitespace".to_string() ).into() );
    }

    let len = prompt.chars().count();

    if len < MIN_PROMPT_LENGTH
    {
      return Err( CoreError::Validation(
        format!( "Prompt must be at least {MIN_PROMPT_LENGTH} character(s)" )
      ).into() );
    }

    if len > MAX_PROMPT_LENGTH
    {
      return Err( CoreError::Validation(
        format!( "Prompt must be no more than {MAX_PROMPT_LENGTH} characters" )
      ).into() );
    }

    Ok( () )
  }

  /// Validates a category string, delegating to `Category::parse` for the
  /// case-insensitive closed-enumeration check.
  ///
  /// # Errors
  ///
  /// Returns `CoreError::Validation` if `raw` is empty or not a recognised
  /// category.
  pub fn validate_category( raw : &str ) -> Result< Category >
  {
    if raw.trim().is_empty()
    {
      return Err( CoreError::Validation( "Category is required".to_string() ).into() );
    }

    Category::parse( raw )
  }

  /// Validates then sanitises a raw prompt, re-validating the sanitised
  /// result since sanitisation can change its length (§4.10). This is the
  /// entry point the Orchestrator's Validate stage calls.
  ///
  /// # Errors
  ///
  /// Returns `CoreError::Validation` from either validation pass.
  pub fn sanitize_and_validate_prompt( raw : &str ) -> Result< String >
  {
    validate_prompt( raw )?;
    let sanitized = sanitize_prompt( raw );
    validate_prompt( &sanitized )?;
    Ok( sanitized )
  }
}

crate::mod_interface!
{
  exposed use
  {
    MAX_PROMPT_LENGTH,
    MIN_PROMPT_LENGTH,
    sanitize_prompt,
    validate_prompt,
    validate_category,
    sanitize_and_validate_prompt,
  };
}
