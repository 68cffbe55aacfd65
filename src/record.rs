mod private
{
  use crate::config::Category;
  use serde::{ Deserialize, Serialize };

  /// Per-role temperature and token-budget overrides a caller may supply
  /// alongside a prompt request (§3).
  #[ derive( Debug, Clone, Default, Serialize, Deserialize ) ]
  pub struct RoleOverride
  {
    /// Overrides the role's configured temperature, if present.
    pub temperature : Option< f32 >,
    /// Overrides the role's configured token budget, if present.
    pub max_tokens : Option< u32 >,
  }

  /// Per-request configuration overrides, keyed informally by role name
  /// (`"deconstructor"`, `"diagnoser"`, `"designer"`, `"evaluator"`).
  #[ derive( Debug, Clone, Default, Serialize, Deserialize ) ]
  pub struct RequestConfig
  {
    /// Override for the Deconstructor role.
    pub deconstructor : Option< RoleOverride >,
    /// Override for the Diagnoser role.
    pub diagnoser : Option< RoleOverride >,
    /// Override for the Designer role.
    pub designer : Option< RoleOverride >,
    /// Override for the Evaluator role.
    pub evaluator : Option< RoleOverride >,
  }

  /// A prompt-optimization request: the raw text plus its category and any
  /// per-role overrides (§3).
  #[ derive( Debug, Clone, Serialize, Deserialize ) ]
  pub struct PromptRequest
  {
    /// Raw natural-language prompt, 1..10,000 code points after normalisation.
    pub raw_text : String,
    /// Closed-enumeration category driving dispatch mode and role framing.
    pub category : Category,
    /// Optional per-role temperature/token-budget overrides.
    pub config : Option< RequestConfig >,
  }

  impl PromptRequest
  {
    /// Constructs a request with no configuration overrides.
    #[ must_use ]
    pub fn new( raw_text : impl Into< String >, category : Category ) -> Self
    {
      Self { raw_text : raw_text.into(), category, config : None }
    }
  }

  /// The result of a single role call (§3). `success` implies non-empty
  /// `content`; `!success` implies a non-empty `errors` list.
  #[ derive( Debug, Clone, Serialize, Deserialize ) ]
  pub struct RoleOutput
  {
    /// Whether the call produced usable content.
    pub success : bool,
    /// Model output text, empty when `!success`.
    pub content : String,
    /// Total tokens consumed across both legs of a tool-resolution call.
    pub tokens_used : u32,
    /// The model name that actually served the call.
    pub model : String,
    /// Wall-clock duration of the call, in milliseconds.
    pub duration_ms : u64,
    /// Accumulated error/warning strings; non-empty iff `!success`, though a
    /// successful call may still carry warnings (e.g. a Parse default).
    pub errors : Vec< String >,
  }

  impl RoleOutput
  {
    /// Constructs a successful role output.
    #[ must_use ]
    pub fn success( content : impl Into< String >, tokens_used : u32, model : impl Into< String >, duration_ms : u64 ) -> Self
    {
      Self
      {
        success : true,
        content : content.into(),
        tokens_used,
        model : model.into(),
        duration_ms,
        errors : Vec::new(),
      }
    }

    /// Constructs a failed role output carrying a single error string.
    #[ must_use ]
    pub fn failure( error : impl Into< String >, duration_ms : u64 ) -> Self
    {
      Self
      {
        success : false,
        content : String::new(),
        tokens_used : 0,
        model : String::new(),
        duration_ms,
        errors : vec![ error.into() ],
      }
    }

    /// Appends a non-fatal warning without flipping `success`.
    pub fn with_warning( mut self, warning : impl Into< String > ) -> Self
    {
      self.errors.push( warning.into() );
      self
    }
  }

  /// The parallel/sequential dispatch choice made for a request (§4.9).
  #[ derive( Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize ) ]
  #[ serde( rename_all = "snake_case" ) ]
  pub enum DispatchMode
  {
    /// Deconstruct and a preliminary Diagnose ran concurrently.
    Parallel,
    /// Deconstruct then Diagnose ran strictly in order.
    Sequential,
  }

  /// The full optimisation result for one request (§3). Any subset of the
  /// intermediate fields may be absent; absence is always paired with at
  /// least one entry in `errors`.
  #[ derive( Debug, Clone, Serialize, Deserialize ) ]
  pub struct OptimizationRecord
  {
    /// The original raw prompt text, as submitted.
    pub original : String,
    /// The category the request was classified under.
    pub category : Category,
    /// Deconstructor output, if that stage completed.
    pub deconstruction : Option< String >,
    /// Diagnoser output, if that stage completed.
    pub diagnosis : Option< String >,
    /// Designer's redesigned prompt, extracted by the Parser.
    pub optimized_prompt : Option< String >,
    /// Sample output produced by running the redesigned prompt.
    pub sample_output : Option< String >,
    /// Evaluator's free-form rubric text.
    pub evaluation : Option< String >,
    /// Evaluator's numeric score in `[0, 100]`, or the Parser's default.
    pub quality_score : Option< u8 >,
    /// Which dispatch mode the Orchestrator chose for this request.
    pub workflow_mode : DispatchMode,
    /// Accumulated error/warning strings for the whole pipeline run.
    pub errors : Vec< String >,
  }

  impl OptimizationRecord
  {
    /// Constructs an empty record for `original`/`category`, prior to running
    /// any pipeline stage.
    #[ must_use ]
    pub fn new( original : impl Into< String >, category : Category, workflow_mode : DispatchMode ) -> Self
    {
      Self
      {
        original : original.into(),
        category,
        deconstruction : None,
        diagnosis : None,
        optimized_prompt : None,
        sample_output : None,
        evaluation : None,
        quality_score : None,
        workflow_mode,
        errors : Vec::new(),
      }
    }

    /// Appends an error/warning string to the record.
    pub fn push_error( &mut self, error : impl Into< String > )
    {
      self.errors.push( error.into() );
    }

    /// Whether all six content fields are populated (the happy-path shape).
    #[ must_use ]
    pub fn is_complete( &self ) -> bool
    {
      self.deconstruction.is_some()
        && self.diagnosis.is_some()
        && self.optimized_prompt.is_some()
        && self.sample_output.is_some()
        && self.evaluation.is_some()
        && self.quality_score.is_some()
    }
  }

  /// An append-only record of a single call's cost (§3).
  #[ derive( Debug, Clone, Serialize, Deserialize ) ]
  pub struct CostRecord
  {
    /// Unix timestamp (seconds) the call completed.
    pub ts : i64,
    /// The model that served the call.
    pub model : String,
    /// Input tokens billed.
    pub prompt_tokens : u32,
    /// Output tokens billed.
    pub completion_tokens : u32,
    /// Computed cost in US dollars.
    pub cost_usd : f64,
    /// The pipeline operation this call belongs to (e.g. `"deconstruct"`).
    pub operation : String,
    /// The request's category, for cost grouping.
    pub category : Category,
  }
}

crate::mod_interface!
{
  exposed use
  {
    RoleOverride,
    RequestConfig,
    PromptRequest,
    RoleOutput,
    DispatchMode,
    OptimizationRecord,
    CostRecord,
  };
}
