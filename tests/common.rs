//! Common test utilities for building flowcharts and fake classifiers.
use async_trait::async_trait;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use triage::error::ResolutionError;
use triage::prelude::{
    Choice, Emphasis, EquipmentModel, FlowchartDefinition, GraphStore, ModelCatalog, Step,
    StepBody, StepKind, TextClassifier, Transition,
};

/// Builds a step with a plain-text body.
#[allow(dead_code)]
pub fn step(id: &str, kind: StepKind, title: &str, text: &str, transition: Transition) -> Step {
    Step {
        id: id.to_string(),
        kind,
        title: title.to_string(),
        body: StepBody::PlainText(text.to_string()),
        icon: None,
        transition,
    }
}

/// Creates a small, valid flowchart for basic tests.
///
/// Shape: `start -> problem_selection -> {check_onu_lights, wifi_ask_initial_problem, end}`,
/// `check_onu_lights -> {los_red_solution, start}`, `wifi_ask_initial_problem -> end`.
#[allow(dead_code)]
pub fn create_simple_flowchart() -> FlowchartDefinition {
    FlowchartDefinition {
        steps: vec![
            step(
                "start",
                StepKind::Start,
                "Início do Atendimento",
                "Bem-vindo.",
                Transition::Next("problem_selection".to_string()),
            ),
            step(
                "problem_selection",
                StepKind::Question,
                "Qual o problema?",
                "Escolha uma opção.",
                Transition::Choices(vec![
                    Choice::new("Sem internet", "check_onu_lights"),
                    Choice::new("Wi-Fi", "wifi_ask_initial_problem"),
                    Choice::new("Outro assunto", "end").with_emphasis(Emphasis::Secondary),
                ]),
            ),
            Step {
                id: "check_onu_lights".to_string(),
                kind: StepKind::Question,
                title: "Verificar as luzes da ONU".to_string(),
                body: StepBody::RichContent("onu_lights_diagram".to_string()),
                icon: Some("server".to_string()),
                transition: Transition::Choices(vec![
                    Choice::new("LOS vermelha", "los_red_solution").with_emphasis(Emphasis::Danger),
                    Choice::new("Reiniciar", "start"),
                ]),
            },
            step(
                "los_red_solution",
                StepKind::Solution,
                "Luz LOS vermelha",
                "Verifique o cabo de fibra.",
                Transition::Terminal,
            ),
            step(
                "wifi_ask_initial_problem",
                StepKind::Question,
                "Qual o problema com o Wi-Fi?",
                "Identifique o sintoma.",
                Transition::Next("end".to_string()),
            ),
            step(
                "end",
                StepKind::Solution,
                "Atendimento finalizado",
                "Registre o protocolo.",
                Transition::Terminal,
            ),
        ],
    }
}

#[allow(dead_code)]
pub fn simple_graph() -> Arc<GraphStore> {
    Arc::new(
        GraphStore::builder(create_simple_flowchart())
            .build()
            .expect("simple flowchart should be valid"),
    )
}

#[allow(dead_code)]
pub fn simple_catalog() -> ModelCatalog {
    ModelCatalog {
        onu_models: vec![
            EquipmentModel {
                name: "ONU A".to_string(),
                image_url: "onu-a.png".to_string(),
            },
            EquipmentModel {
                name: "ONU B".to_string(),
                image_url: "onu-b.png".to_string(),
            },
        ],
        router_models: vec![EquipmentModel {
            name: "Router A".to_string(),
            image_url: "router-a.png".to_string(),
        }],
    }
}

/// A classifier that always gives the same answer and remembers what it was asked.
#[allow(dead_code)]
pub struct ScriptedClassifier {
    answer: Result<String, ResolutionError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl ScriptedClassifier {
    pub fn answering(answer: &str) -> Self {
        Self::with_result(Ok(answer.to_string()))
    }

    pub fn failing(error: ResolutionError) -> Self {
        Self::with_result(Err(error))
    }

    fn with_result(answer: Result<String, ResolutionError>) -> Self {
        Self {
            answer,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextClassifier for ScriptedClassifier {
    async fn classify(&self, prompt: &str) -> Result<String, ResolutionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        self.answer.clone()
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// A classifier that takes `delay` to answer.
#[allow(dead_code)]
pub struct SlowClassifier {
    pub delay: Duration,
    pub answer: String,
}

#[async_trait]
impl TextClassifier for SlowClassifier {
    async fn classify(&self, _prompt: &str) -> Result<String, ResolutionError> {
        tokio::time::sleep(self.delay).await;
        Ok(self.answer.clone())
    }

    fn model_name(&self) -> &str {
        "slow"
    }
}

/// A one-shot HTTP server on localhost.
///
/// Answers the first request with `status` and a JSON `body` after `delay`,
/// and hands back the raw request it received through the join handle.
#[allow(dead_code)]
pub fn spawn_http_responder(
    status: &str,
    body: &str,
    delay: Duration,
) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let base_url = format!("http://{}", listener.local_addr().unwrap());
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        body.len(),
        body
    );

    let handle = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept connection");
        let request = read_http_request(&mut stream);
        thread::sleep(delay);
        let _ = stream.write_all(response.as_bytes());
        let _ = stream.flush();
        request
    });
    (base_url, handle)
}

/// An address nothing listens on.
#[allow(dead_code)]
pub fn closed_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind local listener");
    let address = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}", address)
}

#[allow(dead_code)]
fn read_http_request(stream: &mut TcpStream) -> String {
    let mut buffer = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let read = stream.read(&mut chunk).unwrap_or(0);
        if read == 0 {
            break;
        }
        buffer.extend_from_slice(&chunk[..read]);

        let Some(header_end) = buffer.windows(4).position(|w| w == b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buffer[..header_end]).to_lowercase();
        let content_length = headers
            .lines()
            .find_map(|line| line.strip_prefix("content-length:"))
            .and_then(|value| value.trim().parse::<usize>().ok())
            .unwrap_or(0);
        if buffer.len() >= header_end + 4 + content_length {
            break;
        }
    }
    String::from_utf8_lossy(&buffer).into_owned()
}
