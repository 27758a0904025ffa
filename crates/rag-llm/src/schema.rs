use rag_core::ToolDescriptor;

use crate::protocol::gemini::{GeminiFunctionDeclaration, GeminiTool};
use crate::protocol::{ProtocolResult, ToProvider};

/// Turns tool descriptors into Gemini function declarations.
pub struct ToolSchemaAdapter;

impl ToolSchemaAdapter {
    /// One declaration per descriptor, in input order, grouped into a single
    /// Gemini tool entry. Duplicate names are forwarded as-is. No descriptors
    /// yields no tool entry at all.
    pub fn adapt(descriptors: &[ToolDescriptor]) -> Vec<GeminiTool> {
        let function_declarations: Vec<GeminiFunctionDeclaration> = descriptors
            .iter()
            .map(|descriptor| GeminiFunctionDeclaration {
                name: descriptor.name.clone(),
                description: descriptor.description.clone(),
                parameters: descriptor.parameters.clone(),
            })
            .collect();

        if function_declarations.is_empty() {
            Vec::new()
        } else {
            vec![GeminiTool {
                function_declarations,
            }]
        }
    }
}

impl ToProvider<Vec<GeminiTool>> for Vec<ToolDescriptor> {
    fn to_provider(&self) -> ProtocolResult<Vec<GeminiTool>> {
        Ok(ToolSchemaAdapter::adapt(self))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn descriptor(name: &str, description: &str) -> ToolDescriptor {
        ToolDescriptor::new(
            name,
            description,
            json!({
                "type": "object",
                "properties": {
                    "query": {"type": "string", "description": "What to search for"},
                    "lesson_number": {"type": "integer"}
                },
                "required": ["query"]
            }),
        )
    }

    #[test]
    fn empty_descriptor_list_offers_no_tools() {
        assert!(ToolSchemaAdapter::adapt(&[]).is_empty());
    }

    #[test]
    fn preserves_length_order_and_content() {
        let descriptors = vec![
            descriptor("search_course_content", "Search course materials"),
            descriptor("get_course_outline", "Get a course outline"),
            descriptor("list_courses", "List every course"),
        ];

        let tools = ToolSchemaAdapter::adapt(&descriptors);
        assert_eq!(tools.len(), 1);

        let declarations = &tools[0].function_declarations;
        assert_eq!(declarations.len(), descriptors.len());
        for (declaration, descriptor) in declarations.iter().zip(&descriptors) {
            assert_eq!(declaration.name, descriptor.name);
            assert_eq!(declaration.description, descriptor.description);
            assert_eq!(declaration.parameters, descriptor.parameters);
        }
    }

    #[test]
    fn duplicate_names_are_not_collapsed() {
        let descriptors = vec![descriptor("search", "first"), descriptor("search", "second")];

        let tools: Vec<GeminiTool> = descriptors.to_provider().unwrap();
        let declarations = &tools[0].function_declarations;
        assert_eq!(declarations.len(), 2);
        assert_eq!(declarations[0].description, "first");
        assert_eq!(declarations[1].description, "second");
    }

    #[test]
    fn schema_passes_through_unvalidated() {
        let odd = ToolDescriptor::new("odd", "", json!({"anything": ["goes", 1, null]}));
        let tools = ToolSchemaAdapter::adapt(&[odd.clone()]);
        assert_eq!(tools[0].function_declarations[0].parameters, odd.parameters);
    }
}
