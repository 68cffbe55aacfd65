mod private
{
  use crate::error::{ CoreError, Result };
  use crate::secret::Secret;
  use url::Url;
  use reqwest::header;
  use std::time::Duration;

  /// Default base URL for the upstream chat-completion endpoint.
  pub const DEFAULT_BASE_URL : &str = "https://api.x.ai/v1/";

  /// Default chat-completion model name.
  pub const DEFAULT_MODEL : &str = "grok-4.1-fast";

  /// Default request timeout in seconds (total wall-clock per call).
  pub const DEFAULT_TIMEOUT_SECS : u64 = 60;

  /// Environment configuration for the upstream endpoint.
  ///
  /// Abstracts over where the API key, base URL, model and timeout come from
  /// so that tests can supply a stub implementation without touching the
  /// process environment.
  pub trait Environment : Send + Sync + 'static
  {
    /// Returns the API authentication key.
    fn api_key( &self ) -> &Secret;

    /// Returns the base URL for API requests.
    fn base_url( &self ) -> &Url;

    /// Returns the default chat-completion model name.
    fn model( &self ) -> &str;

    /// Returns the per-request timeout.
    fn timeout( &self ) -> Duration;

    /// Constructs the HTTP headers shared by every request: bearer auth and
    /// JSON content type.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Transient` if a header value fails to parse (this
    /// would only happen for a malformed key containing control characters).
    fn headers( &self ) -> Result< header::HeaderMap >
    {
      let mut headers = header::HeaderMap::new();

      let auth_value = format!( "Bearer {secret}", secret = self.api_key().expose_secret() );
      headers.insert(
        header::AUTHORIZATION,
        auth_value.parse()
          .map_err( |e| CoreError::Transient( format!( "invalid authorization header: {e}" ) ) )?
      );

      headers.insert(
        header::CONTENT_TYPE,
        "application/json".parse()
          .map_err( |e| CoreError::Transient( format!( "invalid content-type header: {e}" ) ) )?
      );

      Ok( headers )
    }
  }

  /// Default `Environment` backed by explicit fields, constructed once at
  /// startup and shared read-only thereafter.
  #[ derive( Debug, Clone ) ]
  pub struct EnvironmentImpl
  {
    api_key : Secret,
    base_url : Url,
    model : String,
    timeout : Duration,
  }

  impl EnvironmentImpl
  {
    /// Creates a new environment with the default base URL, model and timeout.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::UrlParse` if the default base URL is invalid (this
    /// should never happen in practice).
    pub fn new( api_key : Secret ) -> Result< Self >
    {
      Ok( Self
      {
        api_key,
        base_url : Url::parse( DEFAULT_BASE_URL )?,
        model : DEFAULT_MODEL.to_string(),
        timeout : Duration::from_secs( DEFAULT_TIMEOUT_SECS ),
      } )
    }

    /// Overrides the base URL, e.g. from `XAI_API_BASE`.
    #[ must_use ]
    pub fn with_base_url( mut self, base_url : Url ) -> Self
    {
      self.base_url = base_url;
      self
    }

    /// Overrides the default model, e.g. from `XAI_MODEL`.
    #[ must_use ]
    pub fn with_model( mut self, model : impl Into< String > ) -> Self
    {
      self.model = model.into();
      self
    }

    /// Overrides the request timeout.
    #[ must_use ]
    pub fn with_timeout( mut self, timeout : Duration ) -> Self
    {
      self.timeout = timeout;
      self
    }

    /// Builds an environment from the process environment, matching §6:
    /// `XAI_API_KEY` (required), `XAI_API_BASE`, `XAI_MODEL`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Environment` if `XAI_API_KEY` is missing.
    pub fn from_env() -> Result< Self >
    {
      let key = Secret::load_from_env( "XAI_API_KEY" )?;
      let mut env = Self::new( key )?;

      if let Ok( base ) = std::env::var( "XAI_API_BASE" )
      {
        let base = if base.ends_with( '/' ) { base } else { format!( "{base}/" ) };
        env = env.with_base_url( Url::parse( &base )? );
      }

      if let Ok( model ) = std::env::var( "XAI_MODEL" )
      {
        env = env.with_model( model );
      }

      Ok( env )
    }
  }

  impl Environment for EnvironmentImpl
  {
    fn api_key( &self ) -> &Secret
    {
      &self.api_key
    }

    fn base_url( &self ) -> &Url
    {
      &self.base_url
    }

    fn model( &self ) -> &str
    {
      &self.model
    }

    fn timeout( &self ) -> Duration
    {
      self.timeout
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    DEFAULT_BASE_URL,
    DEFAULT_MODEL,
    DEFAULT_TIMEOUT_SECS,
    Environment,
    EnvironmentImpl,
  };
}
