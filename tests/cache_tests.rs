//! Tests for the fingerprinted, TTL-bound response cache.

#![ cfg( feature = "caching" ) ]

use std::time::Duration;
use promptforge_core::cache::{ fingerprint, ResponseCache, TtlCache };
use promptforge_core::config::Category;
use promptforge_core::record::{ DispatchMode, OptimizationRecord, RoleOutput };

#[ test ]
fn fingerprint_is_stable_for_the_same_inputs()
{
  let a = fingerprint( "designer", "make it better", "system" );
  let b = fingerprint( "designer", "make it better", "system" );
  assert_eq!( a, b );
}

#[ test ]
fn fingerprint_distinguishes_role_user_and_system()
{
  let base = fingerprint( "designer", "prompt", "system" );
  assert_ne!( base, fingerprint( "evaluator", "prompt", "system" ) );
  assert_ne!( base, fingerprint( "designer", "other prompt", "system" ) );
  assert_ne!( base, fingerprint( "designer", "prompt", "other system" ) );
}

#[ test ]
fn fingerprint_does_not_collide_across_the_null_byte_boundary()
{
  // "ab" + "\0" + "c" should not collide with "a" + "\0" + "bc".
  let a = fingerprint( "ab", "c", "" );
  let b = fingerprint( "a", "bc", "" );
  assert_ne!( a, b );
}

#[ test ]
fn put_then_get_round_trips()
{
  let cache : TtlCache< String > = TtlCache::new( 10, Duration::from_secs( 60 ) );
  cache.put( "key", "value".to_string(), None );
  assert_eq!( cache.get( "key" ), Some( "value".to_string() ) );
}

#[ test ]
fn get_on_missing_key_counts_as_a_miss()
{
  let cache : TtlCache< String > = TtlCache::new( 10, Duration::from_secs( 60 ) );
  assert_eq!( cache.get( "absent" ), None );

  let stats = cache.stats();
  assert_eq!( stats.hits, 0 );
  assert_eq!( stats.misses, 1 );
}

#[ test ]
fn expired_entry_is_evicted_and_reported_as_a_miss()
{
  let cache : TtlCache< String > = TtlCache::new( 10, Duration::from_secs( 0 ) );
  cache.put( "key", "value".to_string(), Some( Duration::from_secs( 0 ) ) );

  std::thread::sleep( Duration::from_millis( 10 ) );

  assert_eq!( cache.get( "key" ), None );
  assert_eq!( cache.stats().len, 0 );
}

#[ test ]
fn delete_removes_the_entry()
{
  let cache : TtlCache< String > = TtlCache::new( 10, Duration::from_secs( 60 ) );
  cache.put( "key", "value".to_string(), None );
  cache.delete( "key" );
  assert_eq!( cache.get( "key" ), None );
}

#[ test ]
fn clear_empties_the_partition()
{
  let cache : TtlCache< String > = TtlCache::new( 10, Duration::from_secs( 60 ) );
  cache.put( "a", "1".to_string(), None );
  cache.put( "b", "2".to_string(), None );
  cache.clear();
  assert_eq!( cache.stats().len, 0 );
}

#[ test ]
fn capacity_evicts_least_recently_used()
{
  let cache : TtlCache< u32 > = TtlCache::new( 2, Duration::from_secs( 60 ) );
  cache.put( "a", 1, None );
  cache.put( "b", 2, None );
  cache.put( "c", 3, None );

  assert_eq!( cache.get( "a" ), None );
  assert_eq!( cache.get( "b" ), Some( 2 ) );
  assert_eq!( cache.get( "c" ), Some( 3 ) );
}

fn complete_record() -> OptimizationRecord
{
  let mut record = OptimizationRecord::new( "explain recursion", Category::Educational, DispatchMode::Sequential );
  record.deconstruction = Some( "intent: explain a concept".to_string() );
  record.diagnosis = Some( "missing an audience".to_string() );
  record.optimized_prompt = Some( "Explain recursion to a beginner programmer.".to_string() );
  record.sample_output = Some( "Recursion is when a function calls itself...".to_string() );
  record.evaluation = Some( "clear, complete, actionable".to_string() );
  record.quality_score = Some( 88 );
  record
}

#[ test ]
fn response_cache_partitions_hold_distinct_value_types_independently()
{
  let cache = ResponseCache::new();
  let output = RoleOutput::success( "hi", 10, "grok-4.1-fast", 5 );
  let record = complete_record();

  cache.model_responses.put( "k", output.clone(), None );
  cache.records.put( "k", record.clone(), None );

  assert!( cache.model_responses.get( "k" ).is_some() );
  assert!( cache.prompt_results.get( "k" ).is_none() );
  assert!( cache.records.get( "k" ).is_some() );

  let stats = cache.combined_stats();
  assert_eq!( stats.len, 2 );
}

#[ test ]
fn prompt_results_partition_round_trips_a_complete_record()
{
  let cache = ResponseCache::new();
  let record = complete_record();
  let key = fingerprint( Category::Educational.canonical_name(), &record.original, "" );

  cache.prompt_results.put( key.clone(), record.clone(), None );

  let cached = cache.prompt_results.get( &key ).expect( "just inserted" );
  assert_eq!( cached.optimized_prompt, record.optimized_prompt );
  assert_eq!( cached.quality_score, Some( 88 ) );
}
