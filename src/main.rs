//winhost/src/main.rs
//! Headless walkthrough of the window manager.
//!
//! `winhost [single-view|desktop] [--settings <path>] [--verbose]`
//!
//! Runs a short scripted session (rename prompt, save confirmation, a
//! properties dialog with a nested message box, open and save pickers) and
//! answers each surface the way a user would.

mod logging;

use std::path::PathBuf;
use std::sync::Arc;

use winhost::core::Result as WindowResult;
use winhost::kernel::services::adapters::{
    get_settings_path, load_settings_or_default, HeadlessPlatform,
};
use winhost::kernel::services::ports::{
    EnvironmentContext, FilePickerOpenOptions, FilePickerSaveOptions, FileTypeFilter,
    NativeWindow, StorageItem,
};
use winhost::kernel::{
    ConfirmDialog, Dialog, MessageBoxButtons, MessageBoxIcon, MessageBoxResult, SurfaceContent,
    SurfaceHost, WindowManager,
};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mode {
    SingleView,
    Desktop,
}

struct Args {
    mode: Mode,
    settings: Option<PathBuf>,
    verbose: bool,
}

fn parse_args() -> Args {
    let mut args = Args {
        mode: Mode::SingleView,
        settings: None,
        verbose: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "single-view" => args.mode = Mode::SingleView,
            "desktop" => args.mode = Mode::Desktop,
            "--settings" => args.settings = it.next().map(PathBuf::from),
            "--verbose" | "-v" => args.verbose = true,
            other => eprintln!("ignoring unknown argument: {}", other),
        }
    }
    args
}

/// Plays the user: answers whatever surface is on top.
struct Responder {
    host: SurfaceHost,
    platform: Option<HeadlessPlatform>,
}

impl Responder {
    fn top_content(&self) -> Option<SurfaceContent> {
        match &self.platform {
            Some(platform) => platform
                .open_windows()
                .into_iter()
                .rev()
                .find(|w| w.is_active())
                .map(|w| w.content().clone()),
            None => self.host.top_window().map(|w| w.content().clone()),
        }
    }

    fn answer(&self) -> bool {
        match self.top_content() {
            Some(SurfaceContent::InputBox(input)) => {
                println!("  [user] {} -> Payroll", input.prompt());
                input.set_text("Payroll");
                input.accept();
                true
            }
            Some(SurfaceContent::MessageBox(message)) => {
                let answer = message.buttons().results()[0];
                println!("  [user] {} -> {:?}", message.text(), answer);
                message.press(answer);
                true
            }
            Some(SurfaceContent::Dialog(dialog)) => {
                println!("  [user] accepts '{}'", dialog.title());
                dialog.close_requested().emit(true);
                true
            }
            Some(SurfaceContent::Empty) | None => false,
        }
    }
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

async fn answer_until_done<T>(responder: &Responder, task: tokio::task::JoinHandle<T>) -> Option<T> {
    while !task.is_finished() {
        settle().await;
        if !responder.answer() {
            settle().await;
        }
    }
    task.await.ok()
}

async fn session(wm: Arc<WindowManager>, responder: Responder) -> WindowResult<()> {
    println!("== input box");
    let task = tokio::spawn({
        let wm = Arc::clone(&wm);
        async move { wm.input_box("Project name?", None, "Project1").await }
    });
    if let Some(name) = answer_until_done(&responder, task).await {
        println!("  result: {:?}", name?);
    }

    println!("== message box");
    let task = tokio::spawn({
        let wm = Arc::clone(&wm);
        async move {
            wm.message_box(
                "Save changes to Form1?",
                Some("Save"),
                MessageBoxButtons::YesNoCancel,
                MessageBoxIcon::Warning,
            )
            .await
        }
    });
    if let Some(result) = answer_until_done(&responder, task).await {
        let result: MessageBoxResult = result?;
        println!("  result: {:?}", result);
    }

    println!("== nested dialog");
    let task = tokio::spawn({
        let wm = Arc::clone(&wm);
        async move {
            let properties: Arc<dyn Dialog> = Arc::new(ConfirmDialog::new("Project Properties"));
            let outer = {
                let wm = Arc::clone(&wm);
                tokio::spawn(async move { wm.show_dialog(properties).await })
            };
            settle().await;
            let inner = wm
                .message_box(
                    "Startup object changed.",
                    None,
                    MessageBoxButtons::Ok,
                    MessageBoxIcon::Information,
                )
                .await?;
            println!("  inner result: {:?}", inner);
            match outer.await {
                Ok(accepted) => accepted,
                Err(_) => Ok(false),
            }
        }
    });
    if let Some(accepted) = answer_until_done(&responder, task).await {
        println!("  outer accepted: {:?}", accepted?);
    }

    println!("== open file picker");
    if let Some(platform) = &responder.platform {
        platform.queue_open_result(Some(vec![
            StorageItem::Local(PathBuf::from("Payroll.vbp")),
            StorageItem::Remote("content://shared/Report.frm".to_string()),
        ]));
    }
    let picked = wm
        .open_file_picker(FilePickerOpenOptions {
            title: Some("Open Project".to_string()),
            allow_multiple: true,
        })
        .await;
    match picked {
        Ok(paths) => println!("  result: {:?}", paths),
        Err(e) => println!("  error: {}", e),
    }

    println!("== save file picker");
    if let Some(platform) = &responder.platform {
        platform.queue_save_result(Some(StorageItem::Local(PathBuf::from("Form1.frm"))));
    }
    let saved = wm
        .save_file_picker(FilePickerSaveOptions {
            title: Some("Save Form As".to_string()),
            suggested_file_name: Some("Form1.frm".to_string()),
            filters: vec![
                FileTypeFilter::new("Form Files", &["*.frm"]),
                FileTypeFilter::new("All Files", &["*"]),
            ],
        })
        .await;
    match saved {
        Ok(path) => println!("  result: {:?}", path),
        Err(e) => println!("  error: {}", e),
    }

    println!("== surfaces left: {}", wm.host().len());
    Ok(())
}

fn main() -> std::io::Result<()> {
    let args = parse_args();
    let logging_guard = logging::init(None, args.verbose);
    if let (true, Some(guard)) = (args.verbose, &logging_guard) {
        eprintln!("logging to {}", guard.log_dir().display());
    }

    let settings = match args.settings.or_else(get_settings_path) {
        Some(path) => load_settings_or_default(&path),
        None => Default::default(),
    };

    let host = SurfaceHost::new();
    let (environment, platform) = match args.mode {
        Mode::SingleView => (EnvironmentContext::single_view(), None),
        Mode::Desktop => {
            let platform = HeadlessPlatform::new("Visual Basic");
            (
                EnvironmentContext::desktop(Arc::new(platform.clone())),
                Some(platform),
            )
        }
    };
    if let Some(main) = platform.as_ref().and_then(|p| p.main_id()) {
        tracing::info!(main = ?main, "desktop main window ready");
    }

    let wm = Arc::new(WindowManager::new(host.clone(), environment, settings));
    let responder = Responder { host, platform };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    if let Err(e) = runtime.block_on(session(wm, responder)) {
        tracing::error!(error = %e, "session failed");
        eprintln!("error: {}", e);
    }
    Ok(())
}
