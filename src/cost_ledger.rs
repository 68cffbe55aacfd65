mod private
{
  use std::sync::Mutex;
  use crate::config::Category;
  use crate::record::CostRecord;

  /// Per-million-token pricing and an advisory quality score for one model
  /// (§3 supplement, §4.5).
  #[ derive( Debug, Clone, Copy ) ]
  pub struct ModelPricing
  {
    /// Model identifier as sent in `ChatRequest::model`.
    pub model : &'static str,
    /// USD per million input tokens.
    pub input_per_million : f64,
    /// USD per million output tokens.
    pub output_per_million : f64,
    /// Advisory quality score in `[0.0, 1.0]`, used by `suggest_model`.
    pub quality : f64,
  }

  /// The static pricing table backing cost estimation and model suggestion.
  pub const PRICING_TABLE : &[ ModelPricing ] =
  &[
    ModelPricing { model : "grok-4-1-fast-reasoning", input_per_million : 0.20, output_per_million : 0.50, quality : 0.95 },
    ModelPricing { model : "grok-4-1-fast", input_per_million : 0.20, output_per_million : 0.50, quality : 0.90 },
    ModelPricing { model : "grok-3", input_per_million : 3.00, output_per_million : 15.00, quality : 0.92 },
    ModelPricing { model : "grok-3-fast", input_per_million : 5.00, output_per_million : 25.00, quality : 0.90 },
    ModelPricing { model : "grok-2", input_per_million : 2.00, output_per_million : 10.00, quality : 0.82 },
    ModelPricing { model : "grok-vision", input_per_million : 2.00, output_per_million : 10.00, quality : 0.80 },
  ];

  fn pricing_for( model : &str ) -> Option< &'static ModelPricing >
  {
    PRICING_TABLE.iter().find( |p| p.model == model )
  }

  /// Estimates the prompt-token count of `text` via the `cl100k_base`
  /// tokenizer, for callers preparing an `estimated_prompt_tokens` figure
  /// to pass into [`CostLedger::suggest_model`] ahead of a call. Falls back
  /// to a whitespace-word count (the original's own fallback heuristic) if
  /// the tokenizer fails to load.
  #[ cfg( feature = "count_tokens" ) ]
  #[ must_use ]
  pub fn estimate_tokens( text : &str ) -> u32
  {
    match tiktoken_rs::cl100k_base()
    {
      Ok( bpe ) => u32::try_from( bpe.encode_with_special_tokens( text ).len() ).unwrap_or( u32::MAX ),
      Err( _ ) => u32::try_from( text.split_whitespace().count() ).unwrap_or( u32::MAX ),
    }
  }

  /// Computes the USD cost of one call given raw token counts. Unknown
  /// models fall back to `grok-3`'s rates, the original's most conservative
  /// default.
  #[ must_use ]
  pub fn calculate_cost( model : &str, prompt_tokens : u32, completion_tokens : u32 ) -> f64
  {
    let pricing = pricing_for( model ).unwrap_or_else( || pricing_for( "grok-3" ).expect( "grok-3 always present" ) );
    let input_cost = f64::from( prompt_tokens ) / 1_000_000.0 * pricing.input_per_million;
    let output_cost = f64::from( completion_tokens ) / 1_000_000.0 * pricing.output_per_million;
    input_cost + output_cost
  }

  /// Optional spend ceilings the ledger warns against, never enforces
  /// (§4.5: pass-through only).
  #[ derive( Debug, Clone, Copy, Default ) ]
  pub struct Budgets
  {
    /// Daily USD ceiling.
    pub daily_usd : Option< f64 >,
    /// Monthly USD ceiling.
    pub monthly_usd : Option< f64 >,
  }

  /// Aggregated spend for a time window.
  #[ derive( Debug, Clone, Copy, Default ) ]
  pub struct CostSummary
  {
    /// Total USD spent in the window.
    pub total_usd : f64,
    /// Total prompt tokens in the window.
    pub prompt_tokens : u64,
    /// Total completion tokens in the window.
    pub completion_tokens : u64,
    /// Number of recorded calls in the window.
    pub call_count : u64,
  }

  /// A forward spend estimate derived from recent history (§4.5).
  #[ derive( Debug, Clone, Copy ) ]
  pub struct Forecast
  {
    /// Projected total USD over the requested horizon.
    pub projected_usd : f64,
    /// `"low"` below 20 recorded calls, `"medium"` at or above.
    pub confidence : &'static str,
  }

  /// Budget threshold crossed by the most recent `record` call.
  #[ derive( Debug, Clone, Copy, PartialEq, Eq ) ]
  pub enum BudgetAlert
  {
    /// Spend reached 80% or more of the configured ceiling.
    Approaching,
    /// Spend reached or exceeded the configured ceiling.
    Exceeded,
  }

  const SECS_PER_DAY : i64 = 86_400;

  /// Accumulates per-call cost records and answers spend/forecast queries
  /// (§4.5). Thread-safe via an internal mutex; the record list is
  /// unbounded in memory, matching the original's in-process ledger.
  #[ derive( Debug, Default ) ]
  pub struct CostLedger
  {
    records : Mutex< Vec< CostRecord > >,
    budgets : Mutex< Budgets >,
  }

  impl CostLedger
  {
    /// Constructs an empty ledger with no budgets configured.
    #[ must_use ]
    pub fn new() -> Self
    {
      Self { records : Mutex::new( Vec::new() ), budgets : Mutex::new( Budgets::default() ) }
    }

    /// Records one call's cost, returning any budget threshold it crossed.
    /// `ts` is a Unix timestamp in seconds.
    pub fn record
    (
      &self,
      ts : i64,
      model : impl Into< String >,
      prompt_tokens : u32,
      completion_tokens : u32,
      operation : impl Into< String >,
      category : Category,
    ) -> Option< BudgetAlert >
    {
      let model = model.into();
      let cost_usd = calculate_cost( &model, prompt_tokens, completion_tokens );

      let record = CostRecord
      {
        ts,
        model,
        prompt_tokens,
        completion_tokens,
        cost_usd,
        operation : operation.into(),
        category,
      };

      self.records.lock().expect( "cost ledger mutex poisoned" ).push( record );
      self.check_budget_alerts( ts )
    }

    fn check_budget_alerts( &self, now : i64 ) -> Option< BudgetAlert >
    {
      let budgets = *self.budgets.lock().expect( "budgets mutex poisoned" );
      let midnight = now - now.rem_euclid( SECS_PER_DAY );
      let today = self.summary( Some( midnight ), None );

      if let Some( daily ) = budgets.daily_usd
      {
        if today.total_usd >= daily
        {
          return Some( BudgetAlert::Exceeded );
        }
        if today.total_usd >= daily * 0.8
        {
          return Some( BudgetAlert::Approaching );
        }
      }
      None
    }

    /// Sets daily and/or monthly spend ceilings, leaving unspecified ones
    /// unchanged.
    pub fn set_budgets( &self, daily_usd : Option< f64 >, monthly_usd : Option< f64 > )
    {
      let mut guard = self.budgets.lock().expect( "budgets mutex poisoned" );
      if daily_usd.is_some() { guard.daily_usd = daily_usd; }
      if monthly_usd.is_some() { guard.monthly_usd = monthly_usd; }
    }

    /// Aggregates recorded spend within `[since, until]` (Unix seconds),
    /// both ends optional.
    #[ must_use ]
    pub fn summary( &self, since : Option< i64 >, until : Option< i64 > ) -> CostSummary
    {
      let guard = self.records.lock().expect( "cost ledger mutex poisoned" );
      let mut summary = CostSummary::default();

      for record in guard.iter()
      {
        if since.is_some_and( |s| record.ts < s ) { continue; }
        if until.is_some_and( |u| record.ts > u ) { continue; }

        summary.total_usd += record.cost_usd;
        summary.prompt_tokens += u64::from( record.prompt_tokens );
        summary.completion_tokens += u64::from( record.completion_tokens );
        summary.call_count += 1;
      }

      summary
    }

    /// Picks the model that meets `min_quality` at the lowest cost for an
    /// estimated-token prompt/completion split, honouring an optional
    /// per-call cost cap (§3 supplement).
    ///
    /// Falls back to the highest-quality model when nothing clears
    /// `min_quality`, then to the cheapest model overall when a
    /// `max_cost_per_call` excludes every quality-eligible candidate.
    #[ must_use ]
    pub fn suggest_model( estimated_prompt_tokens : u32, min_quality : f64, max_cost_per_call : Option< f64 > ) -> ( &'static str, f64 )
    {
      let estimated_completion_tokens = estimated_prompt_tokens;

      let eligible : Vec< &ModelPricing > = PRICING_TABLE.iter()
        .filter( |p| p.quality >= min_quality )
        .collect();

      let candidates : Vec< &ModelPricing > = if eligible.is_empty()
      {
        PRICING_TABLE.iter().collect()
      }
      else
      {
        eligible
      };

      let costed : Vec< ( &ModelPricing, f64 ) > = candidates.into_iter()
        .map( |p| ( p, calculate_cost( p.model, estimated_prompt_tokens, estimated_completion_tokens ) ) )
        .collect();

      let within_budget : Vec< &( &ModelPricing, f64 ) > = costed.iter()
        .filter( |( _, cost )| max_cost_per_call.is_none_or( |cap| *cost <= cap ) )
        .collect();

      let chosen = if within_budget.is_empty()
      {
        costed.iter().min_by( |a, b| a.1.total_cmp( &b.1 ) )
      }
      else
      {
        within_budget.into_iter().min_by( |a, b| a.1.total_cmp( &b.1 ) ).copied()
      };

      chosen.map_or( ( "grok-3", 0.0 ), |( p, cost )| ( p.model, cost ) )
    }

    /// Projects spend over the next `days` from the trailing 7 days of
    /// history (relative to `now`, a Unix timestamp), scaled linearly.
    /// Confidence is `"medium"` at or above 20 recorded calls overall,
    /// `"low"` below (§4.5 supplement).
    #[ must_use ]
    pub fn forecast( &self, days : u32, now : i64 ) -> Forecast
    {
      let since = now - 7 * SECS_PER_DAY;
      let trailing = self.summary( Some( since ), None );

      let daily_average = if trailing.call_count == 0 { 0.0 } else { trailing.total_usd / 7.0 };
      let total_calls = self.records.lock().expect( "cost ledger mutex poisoned" ).len();

      Forecast
      {
        projected_usd : daily_average * f64::from( days ),
        confidence : if total_calls > 20 { "medium" } else { "low" },
      }
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    ModelPricing,
    PRICING_TABLE,
    calculate_cost,
    #[ cfg( feature = "count_tokens" ) ]
    estimate_tokens,
    Budgets,
    CostSummary,
    Forecast,
    BudgetAlert,
    CostLedger,
  };
}
