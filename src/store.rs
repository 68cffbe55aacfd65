mod private
{
  use crate::error::Result;
  use crate::record::{ CostRecord, OptimizationRecord };
  use std::sync::Mutex;

  /// The narrow external-persistence surface the core consumes (§6): session
  /// history, cost accounting, and a usage-tier gate. Any backing store
  /// satisfying this trait is acceptable; persistence is not in the core's
  /// correctness model. The Orchestrator is generic over `S : Store` rather
  /// than boxing it, so no implementation is required to be object-safe.
  pub trait Store : Send + Sync + 'static
  {
    /// Persists a completed (or partial) optimization record.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unreachable or rejects the
    /// write.
    async fn save_session( &self, record : &OptimizationRecord ) -> Result< () >;

    /// Appends a cost record for external accounting.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing store is unreachable or rejects the
    /// write.
    async fn append_cost( &self, record : &CostRecord ) -> Result< () >;

    /// Checks whether `user` (if given) is within its configured usage tier.
    /// A store that does not implement quota tracking may always return
    /// `true`.
    ///
    /// # Errors
    ///
    /// Returns an error only if the check itself could not be performed
    /// (e.g. the store is unreachable), not for an exceeded quota.
    async fn check_usage( &self, user : Option< &str > ) -> Result< bool >;

    /// Whether the store is currently reachable, for the readiness probe
    /// (§4.11). Default: always true, matching `NullStore`'s no-op backing.
    async fn is_reachable( &self ) -> bool
    {
      true
    }
  }

  /// An in-memory `Store` that discards nothing it is asked to keep and
  /// always reports healthy; used by tests and the demo binary where no
  /// real backing store is wired up.
  #[ derive( Debug, Default ) ]
  pub struct NullStore
  {
    sessions : Mutex< Vec< OptimizationRecord > >,
    costs : Mutex< Vec< CostRecord > >,
  }

  impl NullStore
  {
    /// Constructs an empty in-memory store.
    #[ must_use ]
    pub fn new() -> Self
    {
      Self::default()
    }

    /// Number of sessions recorded so far (for assertions in tests).
    #[ must_use ]
    pub fn session_count( &self ) -> usize
    {
      self.sessions.lock().expect( "store mutex poisoned" ).len()
    }
  }

  impl Store for NullStore
  {
    async fn save_session( &self, record : &OptimizationRecord ) -> Result< () >
    {
      self.sessions.lock().expect( "store mutex poisoned" ).push( record.clone() );
      Ok( () )
    }

    async fn append_cost( &self, record : &CostRecord ) -> Result< () >
    {
      self.costs.lock().expect( "store mutex poisoned" ).push( record.clone() );
      Ok( () )
    }

    async fn check_usage( &self, _user : Option< &str > ) -> Result< bool >
    {
      Ok( true )
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Store,
    NullStore,
  };
}
