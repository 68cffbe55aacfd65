mod private
{
  use crate::chat::{ ChatRequest, ChatResponse };
  use crate::environment::Environment;
  use crate::error::{ CoreError, Result };
  use std::sync::Arc;
  use std::time::Duration;
  use tokio::sync::Semaphore;

  /// Idle connections kept alive per host.
  const MAX_IDLE_PER_HOST : usize = 20;
  /// Upper bound on concurrently in-flight requests across the whole pool.
  const MAX_IN_FLIGHT : usize = 100;
  /// Idle connection expiry.
  const IDLE_EXPIRY : Duration = Duration::from_secs( 30 );
  /// Connect budget per request.
  const CONNECT_TIMEOUT : Duration = Duration::from_secs( 10 );
  /// How long a caller waits for a permit before failing with a pool timeout.
  const ACQUIRE_TIMEOUT : Duration = Duration::from_secs( 5 );

  /// Abstracts over how a chat-completion request actually reaches the
  /// upstream, so that [`crate::model_client::ModelClient`] can be driven
  /// end-to-end in tests against a stub implementing the same trait the real
  /// pool implements, per §2a/§8: "integration-style tests exercise the
  /// orchestrator end-to-end against a stubbed upstream implementing the same
  /// trait the real client implements".
  pub trait Transport : Send + Sync + 'static
  {
    /// Sends one chat-completion request and returns the parsed response.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Transient` on a non-2xx status or transport
    /// failure, `CoreError::Timeout` on saturation/timeout, `CoreError::Parse`
    /// on a malformed response body.
    async fn send( &self, body : &ChatRequest, environment : &dyn Environment ) -> Result< ChatResponse >;

    /// Number of in-flight permits currently available, for the
    /// `open_connections` metrics gauge. Stub implementations may leave this
    /// at the default.
    fn available_permits( &self ) -> usize
    {
      usize::MAX
    }
  }

  /// Process-wide singleton HTTP client with bounded in-flight requests
  /// (§4.2). Concurrent callers share the same keep-alive pool; once
  /// `MAX_IN_FLIGHT` requests are outstanding, further callers wait up to
  /// `ACQUIRE_TIMEOUT` before failing with a non-retryable pool timeout.
  #[ derive( Debug, Clone ) ]
  pub struct ConnectionPool
  {
    client : reqwest::Client,
    in_flight : Arc< Semaphore >,
  }

  impl ConnectionPool
  {
    /// Builds the pool with the fixed limits from §4.2: 20 idle connections
    /// per host, 100 max in-flight, 30s idle expiry, HTTP/1.1 only.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Transient` if the underlying HTTP client fails to
    /// build (invalid TLS configuration, unsupported platform resolver, …).
    pub fn new( request_timeout : Duration ) -> Result< Self >
    {
      let client = reqwest::Client::builder()
        .pool_max_idle_per_host( MAX_IDLE_PER_HOST )
        .pool_idle_timeout( IDLE_EXPIRY )
        .connect_timeout( CONNECT_TIMEOUT )
        .timeout( request_timeout )
        .http1_only()
        .build()
        .map_err( |e| CoreError::Transient( format!( "failed to build HTTP client: {e}" ) ) )?;

      Ok( Self { client, in_flight : Arc::new( Semaphore::new( MAX_IN_FLIGHT ) ) } )
    }

    /// The shared keep-alive client requests are built from, so the pool's
    /// idle-connection limits actually apply.
    #[ must_use ]
    pub fn client( &self ) -> &reqwest::Client
    {
      &self.client
    }
  }

  impl Transport for ConnectionPool
  {
    async fn send( &self, body : &ChatRequest, environment : &dyn Environment ) -> Result< ChatResponse >
    {
      let _permit = tokio::time::timeout( ACQUIRE_TIMEOUT, self.in_flight.acquire() )
        .await
        .map_err( |_| CoreError::Timeout( "connection pool saturated".to_string() ) )?
        .map_err( |e| CoreError::Transient( format!( "pool semaphore closed: {e}" ) ) )?;

      let url = environment.base_url().join( "chat/completions" )?;
      let request = self.client
        .post( url )
        .headers( environment.headers()? )
        .json( body );

      let response = request.send().await?;

      if !response.status().is_success()
      {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();
        return Err( CoreError::Transient( format!( "upstream returned {status}: {text}" ) ).into() );
      }

      let parsed : ChatResponse = response.json().await?;
      Ok( parsed )
    }

    fn available_permits( &self ) -> usize
    {
      self.in_flight.available_permits()
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Transport,
    ConnectionPool,
  };
}
