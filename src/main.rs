mod config;
mod error;
mod models;
mod services;

use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Request, State},
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
};
use error::AppError;
use models::{Document, GenerateResponse, QuestionType, SaveFormat};
use services::llm::LLMClient;
use services::quiz;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::Instrument;
use tracing_subscriber::{EnvFilter, fmt};
use uuid::Uuid;

#[derive(Clone)]
struct AppState {
    llm_client: Arc<LLMClient>,
    output_dir: Arc<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = config::Config::from_env()?;

    let llm_client = Arc::new(LLMClient::new(&config)?);
    tracing::info!("Using model {} at {}", llm_client.model(), config.api_url);

    let app_state = AppState {
        llm_client,
        output_dir: Arc::new(config.output_dir.clone()),
    };

    let app = router(app_state, config.max_upload_bytes);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/generate", post(generate))
        .route("/download/:file", get(download))
        .route("/health", get(health_check))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(tower_http::cors::Any)
                .allow_methods(tower_http::cors::AllowMethods::any())
                .allow_headers(tower_http::cors::AllowHeaders::any()),
        )
}

fn select_options(labels: impl IntoIterator<Item = &'static str>) -> String {
    labels
        .into_iter()
        .map(|label| {
            format!(
                r#"<option value="{}">{}</option>"#,
                html_escape::encode_double_quoted_attribute(label),
                html_escape::encode_text(label)
            )
        })
        .collect()
}

async fn index() -> Html<String> {
    let question_types = select_options(QuestionType::ALL.map(QuestionType::label));
    let save_formats = select_options(SaveFormat::ALL.map(SaveFormat::label));

    let html_content = format!(
        r#"
    <!DOCTYPE html>
    <html>
    <head>
        <title>Engineering Quiz Question Generator</title>
        <meta charset="utf-8">
        <style>
            body {{ font-family: Arial, sans-serif; margin: 40px; }}
            .info-box {{ background-color: #f0f8ff; padding: 20px; border-radius: 8px; margin: 20px 0; }}
            label {{ display: block; margin: 12px 0 4px; }}
            textarea {{ width: 100%; height: 320px; font-family: monospace; }}
        </style>
    </head>
    <body>
        <h1>Engineering Quiz Question Generator</h1>

        <div class="info-box">
            <p>Upload a PDF or Word document, choose the type of quiz question, and save them to a file if desired.</p>
        </div>

        <form id="quiz-form">
            <label for="document">Upload PDF or Word Document</label>
            <input type="file" id="document" name="document" accept=".pdf,.docx" required>

            <label for="question_type">Question Type</label>
            <select id="question_type" name="question_type">{question_types}</select>

            <label for="save_format">Save Questions As</label>
            <select id="save_format" name="save_format">{save_formats}</select>

            <p><button type="submit">Generate</button></p>
        </form>

        <label for="output">Generated Questions</label>
        <textarea id="output" readonly></textarea>
        <p><a id="download" hidden>Download File</a></p>

        <script>
            document.getElementById("quiz-form").addEventListener("submit", async (event) => {{
                event.preventDefault();
                const output = document.getElementById("output");
                const link = document.getElementById("download");
                output.value = "Generating...";
                link.hidden = true;
                const response = await fetch("/generate", {{ method: "POST", body: new FormData(event.target) }});
                const data = await response.json();
                if (!response.ok) {{
                    output.value = data.error;
                    return;
                }}
                output.value = data.questions;
                if (data.download_url) {{
                    link.href = data.download_url;
                    link.hidden = false;
                }}
            }});
        </script>
    </body>
    </html>
    "#
    );

    Html(html_content)
}

async fn health_check() -> &'static str {
    "OK"
}

async fn generate(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<GenerateResponse>, AppError> {
    let mut document = None;
    let mut question_type = QuestionType::default();
    let mut save_format = SaveFormat::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or("unknown").to_string();
        match name.as_str() {
            "document" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                document = Some(Document::new(filename, data.to_vec()));
            }
            "question_type" => question_type = QuestionType::from_label(field.text().await?.trim()),
            "save_format" => save_format = SaveFormat::from_label(field.text().await?.trim()),
            _ => {}
        }
    }

    let document =
        document.ok_or_else(|| AppError::BadRequest("missing 'document' field".to_string()))?;

    let span = tracing::info_span!(
        "generate",
        request_id = %Uuid::new_v4(),
        filename = %document.filename,
        question_type = question_type.label(),
    );

    let output = quiz::generate_quiz(
        document,
        question_type,
        save_format,
        state.llm_client.as_ref(),
        &state.output_dir,
    )
    .instrument(span)
    .await?;

    let download_url = output
        .file
        .as_ref()
        .and_then(|path| path.file_name())
        .map(|name| format!("/download/{}", name.to_string_lossy()));

    Ok(Json(GenerateResponse {
        questions: output.display,
        question_count: output.question_count,
        download_url,
    }))
}

async fn download(
    State(state): State<AppState>,
    Path(file): Path<String>,
    request: Request,
) -> Result<Response, AppError> {
    let Some(file_name) = SaveFormat::ALL
        .into_iter()
        .filter_map(SaveFormat::file_name)
        .find(|name| *name == file)
    else {
        return Err(AppError::NotFound(file));
    };

    let mut response = ServeFile::new(state.output_dir.join(file_name))
        .oneshot(request)
        .await
        .unwrap_or_else(|never| match never {})
        .into_response();

    if response.status().is_success() {
        let disposition = http::HeaderValue::from_str(&format!(
            "attachment; filename=\"{}\"",
            file_name
        ))
        .map_err(|e| AppError::Internal(e.into()))?;
        response
            .headers_mut()
            .insert(http::header::CONTENT_DISPOSITION, disposition);
    }

    Ok(response)
}
