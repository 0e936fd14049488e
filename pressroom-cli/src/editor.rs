use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use pressroom_client::{
    AutoSave, BlogClient, DraftForm, PostDraftSaver, Route, SaveOutcome, extract_headings,
};
use tracing::warn;

use crate::map_client_error;

#[derive(Debug, Clone)]
pub struct EditorOptions {
    pub file: PathBuf,
    pub title: Option<String>,
    pub post_id: Option<i64>,
    pub poll_interval: Duration,
    pub autosave_delay: Duration,
}

/// Заголовок черновика: явный, иначе первый заголовок файла, иначе из `base`.
fn resolve_title(explicit: Option<&str>, markdown: &str, base: &DraftForm, path: &Path) -> String {
    if let Some(title) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }
    if let Some(heading) = extract_headings(markdown).into_iter().next() {
        return heading.text;
    }
    if !base.title.trim().is_empty() {
        return base.title.clone();
    }
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or_default()
        .to_string()
}

/// Пустой файл даёт пустую форму: заголовок без текста не сохраняется.
fn read_form(options: &EditorOptions, base: &DraftForm) -> Result<DraftForm> {
    let content = fs::read_to_string(&options.file)
        .with_context(|| format!("не удалось прочитать {}", options.file.display()))?;
    let title = if content.trim().is_empty() {
        String::new()
    } else {
        resolve_title(options.title.as_deref(), &content, base, &options.file)
    };
    Ok(DraftForm {
        title,
        content,
        ..base.clone()
    })
}

/// Следит за файлом и автосохраняет черновик; Ctrl+C сохраняет и завершает.
pub async fn run_editor(client: BlogClient, options: EditorOptions) -> Result<()> {
    let (saver, base) = match options.post_id {
        Some(id) => {
            let post = client.posts().get(id).await.map_err(map_client_error)?;
            (
                PostDraftSaver::for_post(client.clone(), &post),
                DraftForm::from_post(&post),
            )
        }
        None => (PostDraftSaver::new(client.clone()), DraftForm::default()),
    };

    let autosave = AutoSave::new(saver, base.clone(), options.autosave_delay);
    let mut routes = client.navigator().subscribe();
    let mut ticker = tokio::time::interval(options.poll_interval);
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    println!(
        "Редактирование {}: автосохранение через {} с после изменения, Ctrl+C сохраняет и выходит",
        options.file.display(),
        options.autosave_delay.as_secs()
    );

    let mut reported = None;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            changed = routes.changed() => {
                if changed.is_err() || client.navigator().current() == Route::Login {
                    autosave.cancel();
                    return Err(anyhow!(
                        "сессия истекла: выполните `pressroom login ...` и запустите редактор снова"
                    ));
                }
            }
            _ = ticker.tick() => {
                match read_form(&options, &base) {
                    Ok(form) => autosave.observe(form),
                    Err(err) => warn!(error = %err, "failed to read draft file"),
                }
                let saved_at = autosave.last_saved_at();
                if saved_at != reported {
                    if let Some(at) = saved_at {
                        println!(
                            "Автосохранено в {} (id={})",
                            at.format("%H:%M:%S"),
                            autosave.saver().draft_id().unwrap_or_default()
                        );
                    }
                    reported = saved_at;
                }
            }
        }
    }

    if let Ok(form) = read_form(&options, &base) {
        autosave.observe(form);
    }
    match autosave.flush().await.map_err(map_client_error)? {
        SaveOutcome::Saved => match autosave.saver().draft_id() {
            Some(id) => println!("Черновик сохранён: id={id}"),
            None => println!("Черновик сохранён"),
        },
        SaveOutcome::SkippedBlank => println!("Пустой черновик не сохранён"),
    }
    Ok(())
}
