mod private
{
  use crate::chat::{ ToolDefinition, ToolFunctionDef };

  /// Direct-retrieval collaborator the Designer may consult for example
  /// text (§6 RAG, option (b)). Absence of a hit is never an error; callers
  /// return `None` for "nothing relevant" rather than an empty string.
  pub trait ExampleRetriever : Send + Sync + 'static
  {
    /// Returns up to `max_examples` relevant example snippets for
    /// `category`/`original_prompt`, concatenated into one string ready to
    /// inline into a user prompt, or `None` if nothing relevant was found.
    fn retrieve( &self, category : &str, original_prompt : &str, max_examples : usize ) -> Option< String >;
  }

  /// Builds the `file_search` tool definition offered to the model when the
  /// tool-based retrieval collaborator is configured (§6 RAG, option (a)).
  /// The model decides whether to invoke it; the core never calls it
  /// automatically.
  #[ must_use ]
  pub fn file_search_tool_definition() -> ToolDefinition
  {
    ToolDefinition
    {
      kind : "function".to_string(),
      function : ToolFunctionDef
      {
        name : "file_search".to_string(),
        description : "Search a curated knowledge base of high-quality prompt examples for the current category and return relevant snippets.".to_string(),
        parameters : serde_json::json!(
        {
          "type" : "object",
          "properties" :
          {
            "query" : { "type" : "string", "description" : "Search query describing the kind of example needed" },
          },
          "required" : [ "query" ],
        } ),
      },
    }
  }
}

crate::mod_interface!
{
  exposed use
  {
    ExampleRetriever,
    file_search_tool_definition,
  };
}
