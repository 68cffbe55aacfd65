mod private
{
  use error_tools::dependency::thiserror;

  /// Error conditions raised anywhere in the orchestration runtime.
  ///
  /// Variants map onto the kind taxonomy the runtime reasons about (validation,
  /// transient upstream failure, open-circuit fast-fail, parse/recovery, and
  /// observational budget warnings); several Rust types can map onto the same
  /// kind where the caller only needs to decide retry/no-retry.
  #[ derive( Debug, Clone, PartialEq, thiserror::Error ) ]
  #[ non_exhaustive ]
  pub enum CoreError
  {
    /// Input failed the validator: bad length, forbidden category, empty prompt.
    /// Never retried.
    #[ error( "Validation Error : {0}" ) ]
    Validation( String ),

    /// Transport failure, non-2xx status, or timeout from the upstream endpoint.
    /// Retried within the caller's attempt budget and counted by the circuit breaker.
    #[ error( "Transient Error : {0}" ) ]
    Transient( String ),

    /// The circuit breaker for the upstream endpoint is Open. Not retried.
    #[ error( "Circuit Breaker Open : retry after {retry_after_secs:.1}s" ) ]
    OpenCircuit
    {
      /// Seconds remaining before the breaker allows another attempt.
      retry_after_secs : f64,
    },

    /// Malformed, score-less, or unknown-tool-call model output. Never fatal;
    /// callers recover with a default and a warning.
    #[ error( "Parse Error : {0}" ) ]
    Parse( String ),

    /// A soft cost-budget threshold was crossed. Observational only.
    #[ error( "Budget Warning : {0}" ) ]
    Budget( String ),

    /// Request or connection pool timeout.
    #[ error( "Timeout Error : {0}" ) ]
    Timeout( String ),

    /// JSON serialization or deserialization failure.
    #[ error( "Serialization Error : {0}" ) ]
    Serialization( String ),

    /// The API key or secret configuration is missing or malformed.
    #[ error( "Environment Error : {0}" ) ]
    Environment( String ),

    /// Invalid URL in configuration or endpoint construction.
    #[ error( "URL Parse Error : {0}" ) ]
    UrlParse( String ),
  }

  impl CoreError
  {
    /// Whether this error kind should be retried by the Retry executor and fed
    /// to the circuit breaker as a counted failure.
    #[ inline ]
    #[ must_use ]
    pub fn is_retryable( &self ) -> bool
    {
      matches!( self, CoreError::Transient( _ ) | CoreError::Timeout( _ ) )
    }
  }

  /// Result type alias using `error_tools`.
  ///
  /// The standard `Result` used throughout this crate. All fallible public
  /// operations return this type.
  pub type Result< T > = error_tools::untyped::Result< T >;

  impl From< reqwest::Error > for CoreError
  {
    fn from( error : reqwest::Error ) -> Self
    {
      if error.is_timeout()
      {
        CoreError::Timeout( error.to_string() )
      }
      else
      {
        CoreError::Transient( error.to_string() )
      }
    }
  }

  impl From< serde_json::Error > for CoreError
  {
    fn from( error : serde_json::Error ) -> Self
    {
      CoreError::Serialization( error.to_string() )
    }
  }

  impl From< url::ParseError > for CoreError
  {
    fn from( error : url::ParseError ) -> Self
    {
      CoreError::UrlParse( error.to_string() )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    CoreError,
    Result,
  };
}
