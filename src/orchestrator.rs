mod private
{
  //! Drives the five-stage pipeline in §4.9: Validate, dispatch-mode
  //! selection, Deconstruct/Diagnose (parallel or sequential), Design,
  //! Sample, Evaluate. Owns no cross-request state; everything shared
  //! (cache, cost ledger, model client) is constructed once and held by
  //! reference for the lifetime of the process.

  use std::future::Future;
  use std::sync::Arc;
  use tokio::sync::Semaphore;

  use crate::cache::{ fingerprint, ResponseCache };
  use crate::config::{ Category, PipelineConfig, RoleConfig };
  use crate::cost_ledger::CostLedger;
  use crate::model_client::{ CompletionRequest, ModelClient, ToolResolver };
  use crate::parser::{ extract_optimized_prompt, try_extract_score, DEFAULT_SCORE };
  use crate::rag::ExampleRetriever;
  use crate::record::{ DispatchMode, OptimizationRecord, PromptRequest, RequestConfig, RoleOutput, RoleOverride };
  use crate::roles::{ self, designer::RagContext, RoleTable };
  use crate::store::Store;
  use crate::validation::sanitize_and_validate_prompt;

  /// Neutral sampling parameters for the Sample stage, which runs the
  /// redesigned prompt itself rather than evaluating or redesigning it
  /// (§4.9); not one of the four Role Agents, so not persona-enforced and
  /// not drawn from `RoleTable`.
  const SAMPLE_TEMPERATURE : f32 = 0.7;
  const SAMPLE_MAX_TOKENS : u32 = 1500;

  /// Concurrent role calls permitted per request (§5 scheduling model).
  const WORKERS_PER_REQUEST : usize = 3;

  fn unix_now() -> i64
  {
    chrono::Utc::now().timestamp()
  }

  fn apply_override( config : &mut RoleConfig, over : &Option< RoleOverride > )
  {
    let Some( over ) = over else { return };
    if let Some( temperature ) = over.temperature { config.temperature = temperature; }
    if let Some( max_tokens ) = over.max_tokens { config.max_tokens = max_tokens; }
  }

  /// Applies a request's per-role overrides onto a copy of the base table
  /// (§3, §9: configuration is data handed in, not mutated agent state).
  fn effective_roles( base : &RoleTable, overrides : Option< &RequestConfig > ) -> RoleTable
  {
    let mut roles = base.clone();
    if let Some( cfg ) = overrides
    {
      apply_override( &mut roles.deconstructor, &cfg.deconstructor );
      apply_override( &mut roles.diagnoser, &cfg.diagnoser );
      apply_override( &mut roles.designer, &cfg.designer );
      apply_override( &mut roles.evaluator, &cfg.evaluator );
    }
    roles
  }

  /// Drives one `PromptRequest` through the pipeline and returns a (possibly
  /// partial) `OptimizationRecord`. Generic over the external `Store` rather
  /// than boxed, per the object-safety note in [`crate::store`].
  pub struct Orchestrator< S : Store >
  {
    client : ModelClient,
    roles : RoleTable,
    pipeline : PipelineConfig,
    cache : ResponseCache,
    ledger : CostLedger,
    store : S,
    example_retriever : Option< Arc< dyn ExampleRetriever > >,
    rag_tool_resolver : Option< Arc< dyn ToolResolver > >,
  }

  impl< S : Store > Orchestrator< S >
  {
    /// Constructs an orchestrator with the default role table and pipeline
    /// configuration, no RAG collaborators, and a fresh response cache.
    #[ must_use ]
    pub fn new( client : ModelClient, store : S ) -> Self
    {
      Self
      {
        client,
        roles : RoleTable::default(),
        pipeline : PipelineConfig::default(),
        cache : ResponseCache::new(),
        ledger : CostLedger::new(),
        store,
        example_retriever : None,
        rag_tool_resolver : None,
      }
    }

    /// Overrides the default pipeline tunables (dispatch thresholds, retry
    /// budgets).
    #[ must_use ]
    pub fn with_pipeline_config( mut self, pipeline : PipelineConfig ) -> Self
    {
      self.pipeline = pipeline;
      self
    }

    /// Overrides the default role configuration table.
    #[ must_use ]
    pub fn with_role_table( mut self, roles : RoleTable ) -> Self
    {
      self.roles = roles;
      self
    }

    /// Registers a direct-retrieval RAG collaborator (§6 RAG, option (b)).
    /// Mutually exclusive in effect with [`Self::with_rag_tool`]: direct
    /// retrieval is tried first.
    #[ must_use ]
    pub fn with_example_retriever( mut self, retriever : Arc< dyn ExampleRetriever > ) -> Self
    {
      self.example_retriever = Some( retriever );
      self
    }

    /// Registers a tool-based RAG collaborator (§6 RAG, option (a)): the
    /// `file_search` tool definition is offered to the Designer and calls
    /// are resolved through `resolver`.
    #[ must_use ]
    pub fn with_rag_tool( mut self, resolver : Arc< dyn ToolResolver > ) -> Self
    {
      self.rag_tool_resolver = Some( resolver );
      self
    }

    /// The underlying model client, for the readiness probe (§4.11).
    #[ must_use ]
    pub fn client( &self ) -> &ModelClient
    {
      &self.client
    }

    /// The external store, for the readiness probe (§4.11).
    #[ must_use ]
    pub fn store( &self ) -> &S
    {
      &self.store
    }

    /// The cost ledger, for reporting/budget endpoints (§4.5).
    #[ must_use ]
    pub fn cost_ledger( &self ) -> &CostLedger
    {
      &self.ledger
    }

    /// Combined response-cache hit/miss statistics (§4.4).
    #[ must_use ]
    pub fn cache_stats( &self ) -> crate::cache::CacheStats
    {
      self.cache.combined_stats()
    }

    /// Looks up a previously run record by its original text and category,
    /// regardless of whether that run completed (§4.4 full-record cache).
    #[ must_use ]
    pub fn cached_record( &self, original : &str, category : Category ) -> Option< OptimizationRecord >
    {
      self.cache.records.get( &fingerprint( category.canonical_name(), original, "" ) )
    }

    fn dispatch_mode( &self, category : Category, raw_len : usize ) -> DispatchMode
    {
      if self.pipeline.parallel_categories.contains( &category ) || raw_len > self.pipeline.parallel_length_threshold
      {
        DispatchMode::Parallel
      }
      else
      {
        DispatchMode::Sequential
      }
    }

    fn rag_context( &self, category : Category, raw_prompt : &str ) -> Option< RagContext >
    {
      if let Some( retriever ) = &self.example_retriever
      {
        if let Some( examples ) = retriever.retrieve( category.canonical_name(), raw_prompt, 3 )
        {
          return Some( RagContext::Examples( examples ) );
        }
      }

      self.rag_tool_resolver.as_ref().map( |resolver| RagContext::Tool( crate::rag::file_search_tool_definition(), Arc::clone( resolver ) ) )
    }

    /// Records cost both internally (ledger, budget alerts) and externally
    /// (`Store::append_cost`). The external write is best-effort: persistence
    /// is not in the core's correctness model (§6), so a failure there is
    /// logged and otherwise ignored.
    async fn record_cost( &self, operation : &str, category : Category, output : &RoleOutput )
    {
      if !output.success || output.tokens_used == 0
      {
        return;
      }

      let ts = unix_now();

      // `RoleOutput` preserves only the combined token count (§3); the
      // full prompt/completion split is not retained past the model
      // client, so the whole count is billed against the input rate as a
      // deliberate, documented approximation of the true mixed cost.
      self.ledger.record( ts, output.model.clone(), output.tokens_used, 0, operation, category );

      let record = crate::record::CostRecord
      {
        ts,
        model : output.model.clone(),
        prompt_tokens : output.tokens_used,
        completion_tokens : 0,
        cost_usd : crate::cost_ledger::calculate_cost( &output.model, output.tokens_used, 0 ),
        operation : operation.to_string(),
        category,
      };

      if let Err( _err ) = self.store.append_cost( &record ).await
      {
        #[ cfg( feature = "structured_logging" ) ]
        tracing::warn!( error = %_err, operation, "failed to persist cost record to external store" );
      }
    }

    /// Runs `request` through the cache, recording cost on a successful
    /// upstream call. Used by every one of the four cached Role Agents.
    async fn cached_role_call( &self, role : &str, operation : &str, category : Category, request : CompletionRequest ) -> RoleOutput
    {
      let key = fingerprint( role, &request.user_content, &request.system_prompt );

      if let Some( cached ) = self.cache.model_responses.get( &key )
      {
        return cached;
      }

      let output = self.client.complete( &request ).await;

      if output.success
      {
        self.cache.model_responses.put( key, output.clone(), None );
      }

      self.record_cost( operation, category, &output ).await;
      output
    }

    /// Re-attempts `make_call` up to `max_attempts` times, returning as soon
    /// as one attempt succeeds (§4.9 Sample/Evaluate retry wrapping, on top
    /// of the Model Client's own internal retry/breaker).
    async fn with_stage_retry< F, Fut >( &self, max_attempts : usize, mut make_call : F ) -> RoleOutput
    where
      F : FnMut() -> Fut,
      Fut : Future< Output = RoleOutput >,
    {
      let mut attempt = 0usize;
      loop
      {
        let output = make_call().await;
        attempt += 1;
        if output.success || attempt >= max_attempts
        {
          return output;
        }
      }
    }

    /// Runs Deconstruct and a preliminary Diagnose concurrently, bounded at
    /// `WORKERS_PER_REQUEST` (§4.9 parallel branch). The preliminary result
    /// is advisory only and discarded regardless of outcome.
    async fn deconstruct_parallel( &self, roles : &RoleTable, raw_prompt : &str, category : Category, limit : &Semaphore ) -> RoleOutput
    {
      let deconstruct = async
      {
        let _permit = limit.acquire().await;
        let request = roles::deconstructor::build_request( roles, raw_prompt, category );
        self.cached_role_call( "deconstructor", "deconstruct", category, request ).await
      };

      let preliminary = async
      {
        let _permit = limit.acquire().await;
        roles::diagnoser::run_preliminary( &self.client, roles, raw_prompt, category ).await
      };

      let ( deconstruct_out, _preliminary_out ) = tokio::join!( deconstruct, preliminary );
      deconstruct_out
    }

    async fn deconstruct_sequential( &self, roles : &RoleTable, raw_prompt : &str, category : Category ) -> RoleOutput
    {
      let request = roles::deconstructor::build_request( roles, raw_prompt, category );
      self.cached_role_call( "deconstructor", "deconstruct", category, request ).await
    }

    async fn diagnose( &self, roles : &RoleTable, raw_prompt : &str, deconstruction : &str, category : Category ) -> RoleOutput
    {
      let request = roles::diagnoser::build_request( roles, raw_prompt, deconstruction, category );
      self.cached_role_call( "diagnoser", "diagnose", category, request ).await
    }

    async fn design( &self, roles : &RoleTable, raw_prompt : &str, deconstruction : &str, diagnosis : &str, category : Category ) -> RoleOutput
    {
      let rag = self.rag_context( category, raw_prompt );
      let request = roles::designer::build_request( roles, raw_prompt, deconstruction, diagnosis, category, rag );
      self.cached_role_call( "designer", "design", category, request ).await
    }

    async fn sample( &self, optimized_prompt : &str, category : Category ) -> RoleOutput
    {
      let request = CompletionRequest
      {
        system_prompt : roles::SAMPLE_SYSTEM_PROMPT.to_string(),
        user_content : optimized_prompt.to_string(),
        temperature : SAMPLE_TEMPERATURE,
        max_tokens : SAMPLE_MAX_TOKENS,
        tools : None,
        tool_resolver : None,
        enforce_persona : false,
      };

      let output = self.with_stage_retry( self.pipeline.sample_evaluate_max_attempts, || self.client.complete( &request ) ).await;
      self.record_cost( "sample", category, &output ).await;
      output
    }

    async fn evaluate( &self, roles : &RoleTable, raw_prompt : &str, optimized_prompt : &str, sample_output : &str, category : Category ) -> RoleOutput
    {
      self.with_stage_retry( self.pipeline.sample_evaluate_max_attempts, ||
      {
        let request = roles::evaluator::build_request( roles, raw_prompt, optimized_prompt, sample_output );
        self.cached_role_call( "evaluator", "evaluate", category, request )
      } ).await
    }

    /// Runs the full pipeline for `request` (§4.9). Never panics and never
    /// returns an `Err`; failures are folded into the record's `errors`.
    pub async fn optimize( &self, request : PromptRequest ) -> OptimizationRecord
    {
      let category = request.category;
      let raw_len = request.raw_text.chars().count();
      let mode = self.dispatch_mode( category, raw_len );

      let sanitized = match sanitize_and_validate_prompt( &request.raw_text )
      {
        Ok( text ) => text,
        Err( err ) =>
        {
          let mut record = OptimizationRecord::new( request.raw_text.clone(), category, mode );
          record.push_error( err.to_string() );
          return self.finish( record ).await;
        }
      };

      let prompt_key = fingerprint( category.canonical_name(), &sanitized, "" );
      if let Some( cached ) = self.cache.prompt_results.get( &prompt_key )
      {
        return cached;
      }

      let mut record = OptimizationRecord::new( sanitized.clone(), category, mode );
      let roles = effective_roles( &self.roles, request.config.as_ref() );
      let worker_limit = Semaphore::new( WORKERS_PER_REQUEST );

      let deconstruct_out = match mode
      {
        DispatchMode::Parallel => self.deconstruct_parallel( &roles, &sanitized, category, &worker_limit ).await,
        DispatchMode::Sequential => self.deconstruct_sequential( &roles, &sanitized, category ).await,
      };

      if !deconstruct_out.success
      {
        record.errors.extend( deconstruct_out.errors );
        return self.finish( record ).await;
      }
      record.deconstruction = Some( deconstruct_out.content.clone() );

      let diagnose_out = self.diagnose( &roles, &sanitized, &deconstruct_out.content, category ).await;
      if !diagnose_out.success
      {
        record.errors.extend( diagnose_out.errors );
        return self.finish( record ).await;
      }
      record.diagnosis = Some( diagnose_out.content.clone() );

      let design_out = self.design( &roles, &sanitized, &deconstruct_out.content, &diagnose_out.content, category ).await;
      if !design_out.success
      {
        record.errors.extend( design_out.errors );
        return self.finish( record ).await;
      }

      let optimized_prompt = extract_optimized_prompt( &design_out.content );
      record.optimized_prompt = Some( optimized_prompt.clone() );

      // Everything past this point degrades the record but never discards
      // it (§4.9 failure policy).
      let sample_out = self.sample( &optimized_prompt, category ).await;
      let sample_for_eval = if sample_out.success
      {
        record.sample_output = Some( sample_out.content.clone() );
        sample_out.content
      }
      else
      {
        record.errors.extend( sample_out.errors );
        "[sample output unavailable]".to_string()
      };

      let evaluate_out = self.evaluate( &roles, &sanitized, &optimized_prompt, &sample_for_eval, category ).await;
      if evaluate_out.success
      {
        record.evaluation = Some( evaluate_out.content.clone() );
        match try_extract_score( &evaluate_out.content )
        {
          Some( score ) => record.quality_score = Some( score ),
          None =>
          {
            record.quality_score = Some( DEFAULT_SCORE );
            record.push_error( "quality_score defaulted".to_string() );
          }
        }
      }
      else
      {
        record.errors.extend( evaluate_out.errors );
      }

      self.finish( record ).await
    }

    /// Persists the finished (or partially finished) record to the external
    /// store and the response cache, and returns it unchanged. Every record
    /// lands in the full-record partition so a partial or failed run can
    /// still be recovered by [`Self::cached_record`]; only a complete record
    /// also lands in `prompt_results`, where it short-circuits the next
    /// identical request. The store write is best-effort: a failure there is
    /// logged and otherwise swallowed, since persistence is not in the
    /// core's correctness model (§6).
    async fn finish( &self, record : OptimizationRecord ) -> OptimizationRecord
    {
      let key = fingerprint( record.category.canonical_name(), &record.original, "" );
      self.cache.records.put( key.clone(), record.clone(), None );
      if record.is_complete()
      {
        self.cache.prompt_results.put( key, record.clone(), None );
      }

      if let Err( _err ) = self.store.save_session( &record ).await
      {
        #[ cfg( feature = "structured_logging" ) ]
        tracing::warn!( error = %_err, "failed to persist session record to external store" );
      }

      record
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    Orchestrator,
  };
}
