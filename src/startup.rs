mod private
{
  //! Assembles the process-wide collaborators in the explicit order
  //! spec'd in §9's re-architecture guidance: config, metrics, store, cache,
  //! pool, breaker, ledger, orchestrator. Each prior module-import-time side
  //! effect in the source this was distilled from becomes one ordered call
  //! here, invoked once from `main`.

  use std::sync::Arc;

  use crate::circuit_breaker::{ CircuitBreaker, CircuitBreakerConfig };
  use crate::config::{ PipelineConfig, Settings };
  use crate::environment::{ Environment, EnvironmentImpl };
  use crate::error::Result;
  use crate::model_client::ModelClient;
  use crate::orchestrator::Orchestrator;
  use crate::pool::{ ConnectionPool, Transport };
  use crate::retry::RetryConfig;
  use crate::store::Store;

  #[ cfg( feature = "performance_metrics" ) ]
  use crate::metrics::Metrics;

  /// Everything a process needs to serve requests, built once at startup and
  /// shared read-only thereafter (§9: "a small environment-backed config
  /// object is constructed once at startup ... no component reads
  /// environment variables directly after startup").
  pub struct Runtime< S : Store >
  {
    settings : Settings,
    #[ cfg( feature = "performance_metrics" ) ]
    metrics : Metrics,
    orchestrator : Orchestrator< S >,
  }

  impl< S : Store > Runtime< S >
  {
    /// Builds the runtime from the process environment, in the fixed order
    /// config -> metrics -> store (caller-supplied) -> cache -> pool ->
    /// breaker -> ledger -> orchestrator. `store` is constructed by the
    /// caller since this crate defines no concrete backing store beyond
    /// [`crate::store::NullStore`].
    ///
    /// # Errors
    ///
    /// Returns an error if `SECRET_KEY`/`XAI_API_KEY` are missing, or if the
    /// configured base URL or connection pool fail to construct.
    pub fn build( store : S ) -> Result< Self >
    {
      let settings = Settings::from_env()?;

      #[ cfg( feature = "performance_metrics" ) ]
      let metrics = Metrics::new();

      let environment : Arc< dyn Environment > = Arc::new( EnvironmentImpl::from_env()? );
      let pipeline = PipelineConfig::default();

      let pool : Arc< dyn Transport > = Arc::new( ConnectionPool::new( environment.timeout() )? );
      let breaker_config = CircuitBreakerConfig
      {
        failure_threshold : pipeline.circuit_failure_threshold,
        success_threshold : pipeline.circuit_success_threshold,
        open_timeout : pipeline.circuit_open_timeout,
      };
      let breaker = CircuitBreaker::new( breaker_config );
      let retry = RetryConfig::default();

      let client = ModelClient::new( environment, pool, breaker, retry );
      let orchestrator = Orchestrator::new( client, store ).with_pipeline_config( pipeline );

      Ok( Self
      {
        settings,
        #[ cfg( feature = "performance_metrics" ) ]
        metrics,
        orchestrator,
      } )
    }

    /// The loaded application settings (env-backed, frozen at startup).
    #[ must_use ]
    pub fn settings( &self ) -> &Settings
    {
      &self.settings
    }

    /// The process-wide metrics registry.
    #[ cfg( feature = "performance_metrics" ) ]
    #[ must_use ]
    pub fn metrics( &self ) -> &Metrics
    {
      &self.metrics
    }

    /// The orchestrator every request is driven through.
    #[ must_use ]
    pub fn orchestrator( &self ) -> &Orchestrator< S >
    {
      &self.orchestrator
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Runtime,
  };
}
