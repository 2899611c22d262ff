//! List the agent's tools and their argument schemas.

use crate::agent::tool_definitions;
use crate::cli::Output;
use console::style;

pub fn run_tools() -> anyhow::Result<()> {
    Output::header("Tutor tools");

    for tool in tool_definitions() {
        let function = tool.function;
        println!("\n{}", style(&function.name).bold().cyan());
        if let Some(description) = &function.description {
            println!("  {}", description);
        }
        if let Some(parameters) = &function.parameters {
            let required: Vec<&str> = parameters["required"]
                .as_array()
                .map(|r| r.iter().filter_map(|v| v.as_str()).collect())
                .unwrap_or_default();

            if let Some(properties) = parameters["properties"].as_object() {
                for (name, schema) in properties {
                    let mut kind = schema["type"].as_str().unwrap_or("any").to_string();
                    if let Some(values) = schema["enum"].as_array() {
                        let values: Vec<&str> = values.iter().filter_map(|v| v.as_str()).collect();
                        kind = values.join(" | ");
                    }
                    let marker = if required.contains(&name.as_str()) { "" } else { "?" };
                    Output::kv(&format!("{}{}", name, marker), &kind);
                }
            }
        }
    }
    println!();

    Ok(())
}
