mod private
{
  //! Liveness/readiness probes (§4.11). Unlike a thin API client that probes
  //! the upstream with a live request, the core's probes are cheap local
  //! checks: configuration presence, store reachability, and circuit state.

  use crate::circuit_breaker::CircuitState;
  use crate::environment::Environment;
  use crate::model_client::ModelClient;
  use crate::store::Store;

  /// Result of a liveness or readiness probe.
  #[ derive( Debug, Clone ) ]
  pub struct HealthReport
  {
    /// Overall pass/fail.
    pub healthy : bool,
    /// Individual named checks and their outcome, in evaluation order.
    pub checks : Vec< ( &'static str, bool ) >,
  }

  impl HealthReport
  {
    fn from_checks( checks : Vec< ( &'static str, bool ) > ) -> Self
    {
      let healthy = checks.iter().all( |( _, ok )| *ok );
      Self { healthy, checks }
    }

    /// The first failing check's name, if any.
    #[ must_use ]
    pub fn failure_reason( &self ) -> Option< &'static str >
    {
      self.checks.iter().find( |( _, ok )| !ok ).map( |( name, _ )| *name )
    }
  }

  fn upstream_configured( environment : &dyn Environment ) -> bool
  {
    !environment.api_key().expose_secret().is_empty() && !environment.base_url().as_str().is_empty()
  }

  /// "Is the process alive and its own state internally consistent?" A
  /// strict subset of [`readiness_check`]: it never touches the external
  /// store or the circuit breaker (§4.11).
  #[ must_use ]
  pub fn liveness_check( environment : &dyn Environment ) -> HealthReport
  {
    HealthReport::from_checks( vec![ ( "upstream_configured", upstream_configured( environment ) ) ] )
  }

  /// "Can this process handle a request right now?" OK iff the store is
  /// reachable, the upstream is configured, and the circuit is not Open
  /// (§4.11).
  pub async fn readiness_check< S : Store > ( environment : &dyn Environment, store : &S, client : &ModelClient ) -> HealthReport
  {
    let store_reachable = store.is_reachable().await;
    let circuit_ok = client.circuit_state() != CircuitState::Open;

    HealthReport::from_checks( vec!
    [
      ( "upstream_configured", upstream_configured( environment ) ),
      ( "store_reachable", store_reachable ),
      ( "circuit_not_open", circuit_ok ),
    ] )
  }
}

crate::mod_interface!
{
  exposed use
  {
    HealthReport,
    liveness_check,
    readiness_check,
  };
}
