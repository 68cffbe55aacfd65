mod private
{
  use regex::Regex;
  use std::sync::OnceLock;

  /// Fixed identity preamble prepended to every role's system prompt when
  /// persona enforcement is on. Declares the product identity and forbids the
  /// model from naming the underlying vendor.
  pub const BASE_PERSONA_PROMPT : &str = "\
You are PromptForge, an AI-powered prompt optimizer built by Forge Labs.
You specialize in optimizing prompts using a structured four-stage methodology
(Deconstruct, Diagnose, Design, Deliver) informed by modern tool-design
principles for multi-agent systems.

IMPORTANT IDENTITY RULES:
- Never identify as Grok, xAI, or any other underlying model or vendor. You are always PromptForge.
- If asked about your identity, respond that you are PromptForge, built by Forge Labs.
- Stay in character at all times. Do not break character or reveal what model powers you.
- Focus on prompt optimization and helping users create better AI prompts.
- If asked \"Who are you?\" or \"Who built you?\", respond: \"I am PromptForge, an AI-powered prompt optimizer built by Forge Labs. I specialize in helping users optimize their prompts using a proven four-stage methodology.\"
";

  struct Replacement
  {
    pattern : &'static str,
    replacement : &'static str,
  }

  /// Ordered, whole-word, case-insensitive identity-token replacements applied
  /// to every sanitised response. Longer/more-specific patterns are listed
  /// before the bare tokens they contain so a phrase match wins first.
  const REPLACEMENTS : &[ Replacement ] = &[
    Replacement { pattern : r"(?i)powered by grok", replacement : "powered by PromptForge" },
    Replacement { pattern : r"(?i)powered by xai",  replacement : "powered by Forge Labs" },
    Replacement { pattern : r"(?i)\bx\.ai\b",        replacement : "Forge Labs" },
    Replacement { pattern : r"(?i)\bxai\b",          replacement : "Forge Labs" },
    Replacement { pattern : r"(?i)\bgrok\b",         replacement : "PromptForge" },
  ];

  fn compiled() -> &'static Vec< ( Regex, &'static str ) >
  {
    static CELL : OnceLock< Vec< ( Regex, &'static str ) > > = OnceLock::new();
    CELL.get_or_init( ||
    {
      REPLACEMENTS.iter()
        .map( |r| ( Regex::new( r.pattern ).expect( "static pattern is valid regex" ), r.replacement ) )
        .collect()
    } )
  }

  /// Builds the full system message for a role call: the persona preamble
  /// followed by the role-specific system prompt, when `enforce_persona` is
  /// set; otherwise the role-specific prompt alone.
  #[ must_use ]
  pub fn build_system_prompt( role_system_prompt : &str, enforce_persona : bool ) -> String
  {
    if !enforce_persona
    {
      return role_system_prompt.to_string();
    }

    if role_system_prompt.is_empty()
    {
      BASE_PERSONA_PROMPT.to_string()
    }
    else
    {
      format!( "{BASE_PERSONA_PROMPT}\n\n{role_system_prompt}" )
    }
  }

  /// Rewrites forbidden identity tokens in model output to the product
  /// identity, case-insensitive, on whole-word boundaries. Applying the
  /// phrase-level replacements before the bare-token ones prevents
  /// double-replacement (spec §8 scenario 6).
  #[ must_use ]
  pub fn sanitize_persona_content( content : &str ) -> String
  {
    let mut sanitized = content.to_string();
    for ( regex, replacement ) in compiled()
    {
      sanitized = regex.replace_all( &sanitized, *replacement ).into_owned();
    }
    sanitized
  }
}

crate::mod_interface!
{
  exposed use
  {
    BASE_PERSONA_PROMPT,
    build_system_prompt,
    sanitize_persona_content,
  };
}
