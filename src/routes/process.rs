//! Document intake: multipart PDF upload answered with an SSE stream of
//! progress events and one terminal `complete` or `error` event.

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::http::StatusCode;
use axum::response::Json;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::Stream;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, info};

use crate::models::{Book, Chapter, ErrorBody, ProcessEvent};
use crate::services::{chapterizer, pdf};

pub async fn process_pdf(
    mut multipart: Multipart,
) -> Result<Sse<impl Stream<Item = Result<Event, axum::Error>>>, (StatusCode, Json<ErrorBody>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| bad_request(e.to_string()))?
    {
        if field.name() == Some("file") {
            let data = field.bytes().await.map_err(|e| bad_request(e.to_string()))?;
            info!(size = data.len(), "pdf upload received");

            let (tx, rx) = mpsc::channel(16);
            tokio::spawn(async move {
                if let Err(err) = run_intake(data, &tx).await {
                    error!("pdf intake failed: {err}");
                    let _ = tx
                        .send(ProcessEvent::Error {
                            message: err.to_string(),
                        })
                        .await;
                }
            });

            let stream = ReceiverStream::new(rx).map(|event| Event::default().json_data(&event));
            return Ok(Sse::new(stream).keep_alive(KeepAlive::default()));
        }
    }

    Err(bad_request("missing 'file' field".to_string()))
}

fn bad_request(detail: String) -> (StatusCode, Json<ErrorBody>) {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { detail }))
}

async fn run_intake(pdf_bytes: Bytes, tx: &mpsc::Sender<ProcessEvent>) -> anyhow::Result<()> {
    if !emit(tx, progress(10, None)).await {
        return Ok(());
    }

    let text = pdf::extract_text(&pdf_bytes)?;
    info!(chars = text.len(), "text extracted from pdf");

    stream_book(&text, tx).await;
    Ok(())
}

/// Split `text` and push the remaining intake events. No model calls happen
/// here; every chapter starts unsimplified.
async fn stream_book(text: &str, tx: &mpsc::Sender<ProcessEvent>) {
    let title = chapterizer::derive_title(text);
    if !emit(tx, progress(30, None)).await {
        return;
    }

    let raw_chapters = chapterizer::split_into_chapters(text);
    info!(count = raw_chapters.len(), title = %title, "split into chapters");

    let mut chapters = Vec::with_capacity(raw_chapters.len());
    for (i, raw) in raw_chapters.into_iter().enumerate() {
        let event = progress(
            (40 + i * 5) as u8,
            Some(format!("Extracting chapter {}", i + 1)),
        );
        if !emit(tx, event).await {
            return;
        }

        chapters.push(Chapter {
            chapter_number: raw.number,
            title: format!("Chapter {}", raw.number),
            raw_text: raw.text,
            simplified_text: String::new(),
            image: String::new(),
            image_prompt: String::new(),
            simplified: false,
        });
    }

    let book = Book {
        title,
        total_chapters: chapters.len(),
        chapters,
    };
    let _ = emit(
        tx,
        ProcessEvent::Complete {
            data: book,
            progress: 100,
        },
    )
    .await;
}

fn progress(progress: u8, message: Option<String>) -> ProcessEvent {
    ProcessEvent::Progress { progress, message }
}

/// False means the client went away; the producer just stops.
async fn emit(tx: &mpsc::Sender<ProcessEvent>, event: ProcessEvent) -> bool {
    tx.send(event).await.is_ok()
}
