use crate::graph::ProjectedStep;
use itertools::Itertools;
use std::collections::BTreeMap;

const QUOTE_CHARS: [char; 3] = ['"', '\'', '`'];

/// A query together with the step identifiers it should map to.
///
/// Worked examples are embedded in the prompt to show the classifier the
/// mapping policy; they are never used to validate its answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkedExample {
    pub queries: Vec<String>,
    pub step_ids: Vec<String>,
}

impl WorkedExample {
    pub fn new(queries: &[&str], step_ids: &[&str]) -> Self {
        Self {
            queries: queries.iter().map(|q| q.to_string()).collect(),
            step_ids: step_ids.iter().map(|id| id.to_string()).collect(),
        }
    }

    fn render(&self) -> String {
        let queries = self.queries.iter().map(|q| format!("\"{}\"", q)).join(" ou ");
        let ids = self.step_ids.iter().map(|id| format!("'{}'", id)).join(" ou ");
        format!(
            "- Se o problema for {}, o id relevante é {}.",
            queries, ids
        )
    }
}

/// The default worked examples for the bundled flowchart.
pub fn default_examples() -> Vec<WorkedExample> {
    vec![
        WorkedExample::new(&["luz los piscando"], &["check_onu_lights", "los_red_solution"]),
        WorkedExample::new(&["wi-fi não conecta"], &["wifi_ask_initial_problem"]),
        WorkedExample::new(
            &["tv travando", "imagem congelando"],
            &["iptv_start", "iptv_stuttering_check_connection"],
        ),
        WorkedExample::new(&["internet caiu"], &["problem_selection", "check_onu_lights"]),
    ]
}

/// Builds the single instruction prompt sent to the classifier.
///
/// The projection is serialized as a pretty JSON object keyed by step
/// identifier, in identifier order, so the same graph always yields the same
/// prompt.
pub fn build_prompt(query: &str, projection: &[ProjectedStep], examples: &[WorkedExample]) -> String {
    let keyed: BTreeMap<&str, &ProjectedStep> = projection
        .iter()
        .map(|step| (step.id.as_str(), step))
        .collect();
    // Serializing string-only structs into a JSON object cannot fail.
    let flowchart_json = serde_json::to_string_pretty(&keyed).unwrap_or_default();

    let mut prompt = String::new();
    prompt.push_str(
        "Você é um assistente de IA para o call center de um provedor de internet.\n\
         Sua tarefa é analisar o problema relatado pelo cliente e o fluxograma de diagnóstico em JSON abaixo.\n\
         Com base na descrição do problema, retorne APENAS o 'id' da etapa do fluxograma mais relevante para iniciar a investigação.\n\
         Não retorne nenhuma outra palavra, explicação ou formatação, apenas o 'id'.\n",
    );

    if !examples.is_empty() {
        prompt.push_str("\nExemplos:\n");
        for example in examples {
            prompt.push_str(&example.render());
            prompt.push('\n');
        }
    }

    prompt.push_str(&format!("\nProblema do Cliente: \"{}\"\n", query.trim()));
    prompt.push_str(&format!(
        "\nFluxograma de Diagnóstico (JSON):\n{}\n",
        flowchart_json
    ));
    prompt.push_str("\nID da Etapa Relevante:");
    prompt
}

/// Normalizes a raw classifier answer into a candidate step identifier:
/// trims whitespace and strips surrounding quote characters.
pub fn normalize_candidate(raw: &str) -> &str {
    raw.trim().trim_matches(&QUOTE_CHARS[..]).trim()
}
