mod private
{
  use crate::error::{ CoreError, Result };
  use std::collections::HashSet;
  use std::time::Duration;

  /// The closed category enumeration a prompt request is classified into.
  ///
  /// Unknown values are rejected at Validate (§4.10); the source conflated two
  /// divergent vocabularies (`BUILD_AGENT` vs `CREATIVE`) and this is the single
  /// resolved enumeration an implementer must pick (spec §9).
  #[ derive( Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize ) ]
  #[ serde( rename_all = "snake_case" ) ]
  pub enum Category
  {
    /// Open-ended creative writing prompts.
    Creative,
    /// Technical documentation or explanation prompts.
    Technical,
    /// Analytical/reasoning prompts.
    Analytical,
    /// Marketing copy prompts.
    Marketing,
    /// Educational/teaching prompts.
    Educational,
    /// Prompts that build an autonomous agent or tool-using workflow.
    BuildAgent,
    /// Prompts that define or refine a system prompt.
    SystemPrompt,
    /// Code-generation prompts.
    CodeGeneration,
    /// Documentation-generation prompts.
    Documentation,
  }

  impl Category
  {
    /// Canonical lowercase-with-underscores name, as stored on the record.
    #[ must_use ]
    pub fn canonical_name( self ) -> &'static str
    {
      match self
      {
        Category::Creative => "creative",
        Category::Technical => "technical",
        Category::Analytical => "analytical",
        Category::Marketing => "marketing",
        Category::Educational => "educational",
        Category::BuildAgent => "build_agent",
        Category::SystemPrompt => "system_prompt",
        Category::CodeGeneration => "code_generation",
        Category::Documentation => "documentation",
      }
    }

    /// Parses a category case-insensitively, accepting `"-"` as a separator
    /// alongside `"_"` (e.g. `"build-agent"` and `"BUILD_AGENT"` both resolve).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the value is not in the closed
    /// enumeration.
    pub fn parse( raw : &str ) -> Result< Self >
    {
      let normalized = raw.trim().to_lowercase().replace( '-', "_" );
      match normalized.as_str()
      {
        "creative" => Ok( Category::Creative ),
        "technical" => Ok( Category::Technical ),
        "analytical" => Ok( Category::Analytical ),
        "marketing" => Ok( Category::Marketing ),
        "educational" => Ok( Category::Educational ),
        "build_agent" => Ok( Category::BuildAgent ),
        "system_prompt" => Ok( Category::SystemPrompt ),
        "code_generation" => Ok( Category::CodeGeneration ),
        "documentation" => Ok( Category::Documentation ),
        other => Err( CoreError::Validation( format!( "unknown category: {other}" ) ).into() ),
      }
    }
  }

  /// Immutable per-role configuration: system prompt, temperature, token budget.
  ///
  /// Frozen at construction and shared by reference; no agent mutates its own
  /// configuration between calls (spec §9 re-architecture guidance).
  #[ derive( Debug, Clone ) ]
  pub struct RoleConfig
  {
    /// Role-specific system prompt, appended after the persona preamble.
    pub system_prompt : String,
    /// Sampling temperature for this role's calls.
    pub temperature : f32,
    /// Maximum completion tokens for this role's calls.
    pub max_tokens : u32,
  }

  impl RoleConfig
  {
    /// Constructs a role configuration.
    #[ must_use ]
    pub fn new( system_prompt : impl Into< String >, temperature : f32, max_tokens : u32 ) -> Self
    {
      Self { system_prompt : system_prompt.into(), temperature, max_tokens }
    }
  }

  /// Application settings loaded from the process environment at startup
  /// (spec §6). Missing `XAI_API_KEY` or `SECRET_KEY` is a fatal startup error;
  /// every other field has a default.
  #[ derive( Debug, Clone ) ]
  pub struct Settings
  {
    /// Application secret key (`SECRET_KEY`), used only as a startup presence
    /// check by this core — session signing is an external-store concern.
    pub secret_key : String,
    /// External store connection string (`DATABASE_URL`), opaque to the core.
    pub database_url : String,
    /// Whether collection-backed RAG retrieval is enabled.
    pub enable_collections : bool,
    /// Optional collection id for prompt examples.
    pub collection_id_prompt_examples : Option< String >,
    /// Optional collection id for marketing examples.
    pub collection_id_marketing : Option< String >,
    /// Optional collection id for technical examples.
    pub collection_id_technical : Option< String >,
    /// Free-tier daily call allowance, passed through to the external store.
    pub free_tier_daily_limit : u32,
    /// Paid-tier daily call allowance, passed through to the external store.
    pub paid_tier_daily_limit : u32,
  }

  impl Settings
  {
    /// Loads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Environment` if `SECRET_KEY` is missing.
    pub fn from_env() -> Result< Self >
    {
      let secret_key = std::env::var( "SECRET_KEY" )
        .map_err( |_| CoreError::Environment( "SECRET_KEY not set".to_string() ) )?;

      Ok( Self
      {
        secret_key,
        database_url : std::env::var( "DATABASE_URL" )
          .unwrap_or_else( |_| "sqlite:///prompt_optimizer.db".to_string() ),
        enable_collections : std::env::var( "ENABLE_COLLECTIONS" )
          .map( |v| v.eq_ignore_ascii_case( "true" ) )
          .unwrap_or( false ),
        collection_id_prompt_examples : std::env::var( "COLLECTION_ID_PROMPT_EXAMPLES" ).ok(),
        collection_id_marketing : std::env::var( "COLLECTION_ID_MARKETING" ).ok(),
        collection_id_technical : std::env::var( "COLLECTION_ID_TECHNICAL" ).ok(),
        free_tier_daily_limit : std::env::var( "FREE_TIER_DAILY_LIMIT" )
          .ok().and_then( |v| v.parse().ok() ).unwrap_or( 5 ),
        paid_tier_daily_limit : std::env::var( "PAID_TIER_DAILY_LIMIT" )
          .ok().and_then( |v| v.parse().ok() ).unwrap_or( 1000 ),
      } )
    }
  }

  /// Orchestrator-wide tunables that are not upstream-endpoint configuration:
  /// dispatch thresholds, retry budgets, circuit breaker parameters.
  #[ derive( Debug, Clone ) ]
  pub struct PipelineConfig
  {
    /// Categories that always dispatch in parallel mode, regardless of length.
    pub parallel_categories : HashSet< Category >,
    /// Prompt length (in `char`s) above which dispatch is parallel.
    pub parallel_length_threshold : usize,
    /// `max_attempts` for the Sample and Evaluate stages.
    pub sample_evaluate_max_attempts : usize,
    /// Circuit breaker failure threshold.
    pub circuit_failure_threshold : usize,
    /// Circuit breaker success threshold (HalfOpen -> Closed).
    pub circuit_success_threshold : usize,
    /// Circuit breaker open timeout.
    pub circuit_open_timeout : Duration,
  }

  impl Default for PipelineConfig
  {
    fn default() -> Self
    {
      Self
      {
        parallel_categories : [ Category::BuildAgent, Category::SystemPrompt ].into_iter().collect(),
        parallel_length_threshold : 500,
        sample_evaluate_max_attempts : 2,
        circuit_failure_threshold : 5,
        circuit_success_threshold : 2,
        circuit_open_timeout : Duration::from_secs( 60 ),
      }
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Category,
    RoleConfig,
    Settings,
    PipelineConfig,
  };
}
