mod private
{
  //! Prometheus-compatible counters, gauges, and per-role timing histograms
  //! (§4.11). Metrics are process-global and thread-safe; the registry is
  //! constructed once at startup and shared by reference.

  use std::time::Duration;
  use prometheus::{ Counter, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry };

  /// Collects the counters/gauges/histograms named in §4.11 and exports
  /// them in Prometheus text format.
  pub struct Metrics
  {
    registry : Registry,
    api_requests : Counter,
    api_cache_hits : Counter,
    circuit_opens : Counter,
    retries_total : Counter,
    open_connections : Gauge,
    circuit_state : Gauge,
    role_duration : HistogramVec,
    request_duration : Histogram,
  }

  impl std::fmt::Debug for Metrics
  {
    fn fmt( &self, f : &mut std::fmt::Formatter< '_ > ) -> std::fmt::Result
    {
      f.debug_struct( "Metrics" ).field( "registry", &"<Registry>" ).finish()
    }
  }

  impl Metrics
  {
    /// Constructs and registers every metric.
    ///
    /// # Panics
    ///
    /// Panics if metric registration fails (only possible with a malformed
    /// static metric name, which never happens here).
    #[ must_use ]
    pub fn new() -> Self
    {
      let registry = Registry::new();

      let api_requests = Counter::with_opts( Opts::new( "api_requests_total", "Total role calls issued" ) ).expect( "valid metric opts" );
      let api_cache_hits = Counter::with_opts( Opts::new( "api_cache_hits_total", "Total response cache hits" ) ).expect( "valid metric opts" );
      let circuit_opens = Counter::with_opts( Opts::new( "circuit_opens_total", "Total Closed/HalfOpen -> Open transitions" ) ).expect( "valid metric opts" );
      let retries_total = Counter::with_opts( Opts::new( "retries_total", "Total retry attempts issued" ) ).expect( "valid metric opts" );

      let open_connections = Gauge::with_opts( Opts::new( "open_connections", "Available connection pool permits" ) ).expect( "valid metric opts" );
      let circuit_state = Gauge::with_opts( Opts::new( "circuit_state", "0=Closed, 1=HalfOpen, 2=Open" ) ).expect( "valid metric opts" );

      let role_duration = HistogramVec::new(
        HistogramOpts::new( "role_duration_seconds", "Per-role call duration" ),
        &[ "role" ],
      ).expect( "valid histogram opts" );

      let request_duration = Histogram::with_opts( HistogramOpts::new( "request_duration_seconds", "End-to-end optimisation request duration" ) )
        .expect( "valid histogram opts" );

      registry.register( Box::new( api_requests.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( api_cache_hits.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( circuit_opens.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( retries_total.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( open_connections.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( circuit_state.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( role_duration.clone() ) ).expect( "unique metric name" );
      registry.register( Box::new( request_duration.clone() ) ).expect( "unique metric name" );

      Self
      {
        registry,
        api_requests,
        api_cache_hits,
        circuit_opens,
        retries_total,
        open_connections,
        circuit_state,
        role_duration,
        request_duration,
      }
    }

    /// Records one role call's latency and bumps the request counter.
    pub fn record_role_call( &self, role : &str, duration : Duration )
    {
      self.api_requests.inc();
      self.role_duration.with_label_values( &[ role ] ).observe( duration.as_secs_f64() );
    }

    /// Records one end-to-end optimisation request's latency.
    pub fn record_request( &self, duration : Duration )
    {
      self.request_duration.observe( duration.as_secs_f64() );
    }

    /// Bumps the cache-hit counter.
    pub fn record_cache_hit( &self )
    {
      self.api_cache_hits.inc();
    }

    /// Bumps the circuit-open counter.
    pub fn record_circuit_open( &self )
    {
      self.circuit_opens.inc();
    }

    /// Bumps the retry counter.
    pub fn record_retry( &self )
    {
      self.retries_total.inc();
    }

    /// Sets the open-connections gauge (available pool permits).
    pub fn set_open_connections( &self, permits : usize )
    {
      self.open_connections.set( permits as f64 );
    }

    /// Sets the circuit-state gauge: 0 Closed, 1 HalfOpen, 2 Open.
    pub fn set_circuit_state( &self, state : crate::circuit_breaker::CircuitState )
    {
      let value = match state
      {
        crate::circuit_breaker::CircuitState::Closed => 0.0,
        crate::circuit_breaker::CircuitState::HalfOpen => 1.0,
        crate::circuit_breaker::CircuitState::Open => 2.0,
      };
      self.circuit_state.set( value );
    }

    /// Renders the full snapshot in Prometheus text exposition format
    /// (§2a, §6 `/metrics`).
    ///
    /// # Panics
    ///
    /// Panics only on an internal encoder error, which the `prometheus`
    /// crate never raises for a registry built from valid metric families.
    #[ must_use ]
    pub fn export( &self ) -> String
    {
      use prometheus::Encoder;

      let encoder = prometheus::TextEncoder::new();
      let families = self.registry.gather();

      let mut buffer = Vec::new();
      encoder.encode( &families, &mut buffer ).expect( "prometheus encoder never fails on a valid registry" );

      String::from_utf8( buffer ).expect( "prometheus text format is always valid UTF-8" )
    }
  }

  impl Default for Metrics
  {
    fn default() -> Self
    {
      Self::new()
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Metrics,
  };
}
