mod private
{
  use std::sync::Arc;

  use crate::chat::ToolDefinition;
  use crate::config::Category;
  use crate::model_client::{ CompletionRequest, ModelClient, ToolResolver };
  use crate::record::RoleOutput;
  use crate::roles::{ category_context, RoleTable };

  /// External context the Designer may cite when present (§6 RAG). Absence
  /// of either is never an error.
  #[ derive( Clone ) ]
  pub enum RagContext
  {
    /// Example text retrieved directly by the caller, inlined into the
    /// user prompt.
    Examples( String ),
    /// A `file_search`-style tool definition plus its resolver, offered to
    /// the model and resolved through the standard tool-call leg.
    Tool( ToolDefinition, Arc< dyn ToolResolver > ),
  }

  /// Builds the completion request for a Design call (§4.4, §8 cache
  /// idempotence). `rag` context makes two otherwise-identical calls hash
  /// to different fingerprints, which is correct: the amended prompt is a
  /// different request.
  #[ must_use ]
  pub fn build_request
  (
    roles : &RoleTable,
    raw_prompt : &str,
    deconstruction : &str,
    diagnosis : &str,
    category : Category,
    rag : Option< RagContext >,
  ) -> CompletionRequest
  {
    let mut system_prompt = format!( "{}\n\n{}", roles.designer.system_prompt, category_context( category ) );
    let mut user_content = format!(
      "Original Prompt:\n{raw_prompt}\n\nDeconstruction:\n{deconstruction}\n\nDiagnosis:\n{diagnosis}\n\nDesign an optimized version of this prompt. Include both the optimized prompt and a brief explanation of improvements."
    );

    let ( tools, tool_resolver ) = match rag
    {
      Some( RagContext::Examples( examples ) ) =>
      {
        user_content.push_str( &format!( "\n\nReference Examples (from knowledge base):\n{examples}\n\nUse these examples as inspiration while creating the optimized prompt." ) );
        ( None, None )
      }
      Some( RagContext::Tool( definition, resolver ) ) =>
      {
        system_prompt.push_str( "\n\nYou have access to a knowledge base of high-quality prompt examples via the file_search tool. Use it to find well-structured prompts in this domain before finalizing your design." );
        ( Some( vec![ definition ] ), Some( resolver ) )
      }
      None => ( None, None ),
    };

    CompletionRequest
    {
      system_prompt,
      user_content,
      temperature : roles.designer.temperature,
      max_tokens : roles.designer.max_tokens,
      tools,
      tool_resolver,
      enforce_persona : true,
    }
  }

  /// Produces a rewritten prompt plus an explanation of the improvements
  /// (§4.7). When `rag` carries retrieved examples or a search tool, the
  /// system/user prompt is amended to cite it; the role still succeeds
  /// with no retrieval context at all.
  pub async fn run
  (
    client : &ModelClient,
    roles : &RoleTable,
    raw_prompt : &str,
    deconstruction : &str,
    diagnosis : &str,
    category : Category,
    rag : Option< RagContext >,
  ) -> RoleOutput
  {
    let request = build_request( roles, raw_prompt, deconstruction, diagnosis, category, rag );
    client.complete( &request ).await
  }
}

crate::mod_interface!
{
  exposed use
  {
    RagContext,
    build_request,
    run,
  };
}
