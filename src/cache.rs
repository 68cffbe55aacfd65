mod private
{
  use lru::LruCache;
  use serde::{ Serialize, Deserialize };
  use serde::de::DeserializeOwned;
  use sha2::{ Sha256, Digest };
  use std::num::NonZeroUsize;
  use std::sync::Mutex;
  use std::time::{ Duration, SystemTime, UNIX_EPOCH };

  use crate::record::{ OptimizationRecord, RoleOutput };

  /// SHA-256 fingerprint over `role-name \0 user_prompt \0 system_prompt`
  /// (§4.4, glossary "Fingerprint"). `system_prompt` may be empty.
  #[ must_use ]
  pub fn fingerprint( role : &str, user_prompt : &str, system_prompt : &str ) -> String
  {
    let mut hasher = Sha256::new();
    hasher.update( role.as_bytes() );
    hasher.update( [ 0u8 ] );
    hasher.update( user_prompt.as_bytes() );
    hasher.update( [ 0u8 ] );
    hasher.update( system_prompt.as_bytes() );
    format!( "{:x}", hasher.finalize() )
  }

  fn now_secs() -> u64
  {
    SystemTime::now().duration_since( UNIX_EPOCH ).expect( "system clock before epoch" ).as_secs()
  }

  #[ derive( Debug, Clone, Serialize, Deserialize ) ]
  struct Entry< V >
  {
    value : V,
    inserted_at : u64,
    ttl_seconds : u64,
  }

  impl< V > Entry< V >
  {
    fn is_expired( &self, now : u64 ) -> bool
    {
      now.saturating_sub( self.inserted_at ) > self.ttl_seconds
    }
  }

  /// Snapshot of hit/miss counters for one partition.
  #[ derive( Debug, Clone, Copy, Default ) ]
  pub struct CacheStats
  {
    /// Number of `get` calls that returned a live value.
    pub hits : u64,
    /// Number of `get` calls that returned nothing (absent or expired).
    pub misses : u64,
    /// Current number of live entries.
    pub len : usize,
  }

  /// A single bounded LRU partition with per-entry TTL and optional disk
  /// persistence (§4.4). Thread-safe via an internal mutex.
  pub struct TtlCache< V >
  {
    inner : Mutex< LruCache< String, Entry< V > > >,
    default_ttl : Duration,
    persist_path : Option< std::path::PathBuf >,
    hits : std::sync::atomic::AtomicU64,
    misses : std::sync::atomic::AtomicU64,
  }

  impl< V : Clone + Serialize + DeserializeOwned > TtlCache< V >
  {
    /// Constructs a partition with the given capacity and default TTL.
    #[ must_use ]
    pub fn new( capacity : usize, default_ttl : Duration ) -> Self
    {
      Self
      {
        inner : Mutex::new( LruCache::new( NonZeroUsize::new( capacity ).unwrap_or( NonZeroUsize::MIN ) ) ),
        default_ttl,
        persist_path : None,
        hits : std::sync::atomic::AtomicU64::new( 0 ),
        misses : std::sync::atomic::AtomicU64::new( 0 ),
      }
    }

    /// Enables disk persistence at `path`: loaded eagerly, written after
    /// every `put` (§4.4 "at-most-once-per-mutation best-effort writes").
    #[ must_use ]
    pub fn with_persistence( mut self, path : impl Into< std::path::PathBuf > ) -> Self
    {
      self.persist_path = Some( path.into() );
      self.load_from_disk();
      self
    }

    /// Looks up `key`. An expired entry is evicted and reported as a miss.
    pub fn get( &self, key : &str ) -> Option< V >
    {
      let mut guard = self.inner.lock().expect( "cache mutex poisoned" );
      let now = now_secs();

      let expired = guard.peek( key ).is_some_and( |e| e.is_expired( now ) );
      if expired
      {
        guard.pop( key );
      }

      match guard.get( key )
      {
        Some( entry ) =>
        {
          self.hits.fetch_add( 1, std::sync::atomic::Ordering::Relaxed );
          Some( entry.value.clone() )
        }
        None =>
        {
          self.misses.fetch_add( 1, std::sync::atomic::Ordering::Relaxed );
          None
        }
      }
    }

    /// Inserts `value` under `key`, evicting the least-recently-used entry
    /// first if at capacity. `ttl` overrides the partition default when set.
    pub fn put( &self, key : impl Into< String >, value : V, ttl : Option< Duration > )
    {
      let entry = Entry
      {
        value,
        inserted_at : now_secs(),
        ttl_seconds : ttl.unwrap_or( self.default_ttl ).as_secs(),
      };

      {
        let mut guard = self.inner.lock().expect( "cache mutex poisoned" );
        guard.put( key.into(), entry );
      }

      self.persist_to_disk();
    }

    /// Removes `key`, if present.
    pub fn delete( &self, key : &str )
    {
      let mut guard = self.inner.lock().expect( "cache mutex poisoned" );
      guard.pop( key );
      drop( guard );
      self.persist_to_disk();
    }

    /// Clears the partition.
    pub fn clear( &self )
    {
      let mut guard = self.inner.lock().expect( "cache mutex poisoned" );
      guard.clear();
      drop( guard );
      self.persist_to_disk();
    }

    /// Current hit/miss/size statistics.
    #[ must_use ]
    pub fn stats( &self ) -> CacheStats
    {
      let guard = self.inner.lock().expect( "cache mutex poisoned" );
      CacheStats
      {
        hits : self.hits.load( std::sync::atomic::Ordering::Relaxed ),
        misses : self.misses.load( std::sync::atomic::Ordering::Relaxed ),
        len : guard.len(),
      }
    }

    #[ cfg( feature = "cache_persistence" ) ]
    fn persist_to_disk( &self )
    {
      let Some( path ) = &self.persist_path else { return };

      let guard = self.inner.lock().expect( "cache mutex poisoned" );
      let snapshot : Vec< ( String, Entry< V > ) > = guard.iter()
        .map( |( k, v )| ( k.clone(), v.clone() ) )
        .collect();
      drop( guard );

      if let Some( parent ) = path.parent()
      {
        let _ = std::fs::create_dir_all( parent );
      }

      if let Ok( json ) = serde_json::to_vec( &snapshot )
      {
        let _ = std::fs::write( path, json );
      }
    }

    #[ cfg( not( feature = "cache_persistence" ) ) ]
    fn persist_to_disk( &self ) {}

    #[ cfg( feature = "cache_persistence" ) ]
    fn load_from_disk( &self )
    {
      let Some( path ) = &self.persist_path else { return };
      let Ok( bytes ) = std::fs::read( path ) else { return };
      let Ok( snapshot ) = serde_json::from_slice::< Vec< ( String, Entry< V > ) > >( &bytes ) else { return };

      let now = now_secs();
      let mut guard = self.inner.lock().expect( "cache mutex poisoned" );
      for ( key, entry ) in snapshot
      {
        if !entry.is_expired( now )
        {
          guard.put( key, entry );
        }
      }
    }

    #[ cfg( not( feature = "cache_persistence" ) ) ]
    fn load_from_disk( &self ) {}
  }

  /// The three named partitions the Response Cache is split into (§4.4
  /// supplement): model-level completions, prompt-level results, and full
  /// optimisation records, each with its own bound, TTL, and value shape.
  /// `prompt_results` short-circuits the whole pipeline for a repeated
  /// `(category, sanitized prompt)` pair; `records` is a full-record lookup
  /// populated for every run, complete or not, so a caller can recover a
  /// failed run's partial record by its original text (§4.4, §4.9).
  pub struct ResponseCache
  {
    /// Per-role-call model completions: 500 entries, 3600s TTL.
    pub model_responses : TtlCache< RoleOutput >,
    /// Hashed `(category, sanitized prompt)` to a complete prior record:
    /// 1000 entries, 86400s TTL.
    pub prompt_results : TtlCache< OptimizationRecord >,
    /// Full optimisation records, complete or partial: 500 entries, 7200s TTL.
    pub records : TtlCache< OptimizationRecord >,
  }

  impl ResponseCache
  {
    /// Constructs the three partitions with the bounds/TTLs from §4.4.
    #[ must_use ]
    pub fn new() -> Self
    {
      Self
      {
        model_responses : TtlCache::new( 500, Duration::from_secs( 3600 ) ),
        prompt_results : TtlCache::new( 1000, Duration::from_secs( 86_400 ) ),
        records : TtlCache::new( 500, Duration::from_secs( 7200 ) ),
      }
    }

    /// Combined hit/miss totals across all three partitions.
    #[ must_use ]
    pub fn combined_stats( &self ) -> CacheStats
    {
      let a = self.model_responses.stats();
      let b = self.prompt_results.stats();
      let c = self.records.stats();
      CacheStats
      {
        hits : a.hits + b.hits + c.hits,
        misses : a.misses + b.misses + c.misses,
        len : a.len + b.len + c.len,
      }
    }
  }

  impl Default for ResponseCache
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
    fingerprint,
    CacheStats,
    TtlCache,
    ResponseCache,
  };
}
