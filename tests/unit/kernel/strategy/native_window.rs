use super::*;
use crate::kernel::content::ConfirmDialog;
use crate::kernel::services::adapters::headless::{HeadlessPlatform, PickerCall};
use crate::kernel::services::ports::{FileTypeFilter, NativeWindow, StorageItem};

fn run<F: std::future::Future>(fut: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(fut)
}

async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

fn strategy() -> (HeadlessPlatform, Arc<NativeWindowStrategy>) {
    let platform = HeadlessPlatform::new("Main");
    let strategy = Arc::new(NativeWindowStrategy::new(Arc::new(platform.clone())));
    (platform, strategy)
}

#[test]
fn dialog_is_owned_by_main_window_when_nothing_is_focused() {
    run(async {
        let (platform, s) = strategy();
        let dialog = Arc::new(ConfirmDialog::new("Add Form"));
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = dialog.clone();
            async move { s.show_dialog(dialog).await }
        });
        settle().await;

        let window = platform.find_open("Add Form").unwrap();
        assert!(window.is_modal());
        assert_eq!(window.owner(), platform.main_id());

        dialog.accept();
        assert_eq!(task.await.unwrap(), Ok(true));
        assert!(platform.find_open("Add Form").is_none());
    });
}

#[test]
fn nested_dialog_is_owned_by_focused_dialog() {
    run(async {
        let (platform, s) = strategy();
        let outer = Arc::new(ConfirmDialog::new("Outer"));
        let outer_task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = outer.clone();
            async move { s.show_dialog(dialog).await }
        });
        settle().await;
        let outer_id = platform.find_open("Outer").unwrap().id();

        let inner_task = tokio::spawn({
            let s = Arc::clone(&s);
            async move {
                s.message_box(
                    "Sure?".into(),
                    "Inner".into(),
                    MessageBoxButtons::OkCancel,
                    MessageBoxIcon::Question,
                )
                .await
            }
        });
        settle().await;

        let inner = platform.find_open("Inner").unwrap();
        assert_eq!(inner.owner(), Some(outer_id));

        inner
            .content()
            .as_message_box()
            .unwrap()
            .press(MessageBoxResult::Ok);
        assert_eq!(inner_task.await.unwrap(), Ok(MessageBoxResult::Ok));
        assert!(!outer_task.is_finished());

        outer.cancel();
        assert_eq!(outer_task.await.unwrap(), Ok(false));
    });
}

#[test]
fn environment_close_yields_dismissed_results() {
    run(async {
        let (platform, s) = strategy();
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move {
                s.input_box("Name?".into(), "Rename".into(), "x".into())
                    .await
            }
        });
        settle().await;

        platform.find_open("Rename").unwrap().close();
        assert_eq!(task.await.unwrap(), Ok(None));
    });
}

#[test]
fn request_after_environment_close_is_ignored() {
    run(async {
        let (platform, s) = strategy();
        let dialog = Arc::new(ConfirmDialog::new("Late"));
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = dialog.clone();
            async move { s.show_dialog(dialog).await }
        });
        settle().await;

        platform.find_open("Late").unwrap().close();
        dialog.accept();
        assert_eq!(task.await.unwrap(), Ok(false));
    });
}

#[test]
fn input_box_returns_entered_text() {
    run(async {
        let (platform, s) = strategy();
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move {
                s.input_box("Name?".into(), "Rename".into(), "Form1".into())
                    .await
            }
        });
        settle().await;

        let window = platform.find_open("Rename").unwrap();
        let input = window.content().as_input_box().unwrap();
        assert_eq!(input.prompt(), "Name?");
        input.accept();
        assert_eq!(task.await.unwrap(), Ok(Some("Form1".to_string())));
    });
}

#[test]
fn persistent_window_is_modeless() {
    run(async {
        let (platform, s) = strategy();
        let dialog = Arc::new(ConfirmDialog::new("Object Browser"));
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = dialog.clone();
            async move { s.show_window(dialog, None).await }
        });
        settle().await;

        let window = platform.find_open("Object Browser").unwrap();
        assert!(!window.is_modal());
        window.close();
        assert_eq!(task.await.unwrap(), Ok(()));
    });
}

#[test]
fn open_picker_keeps_only_local_paths() {
    run(async {
        let (platform, s) = strategy();
        platform.queue_open_result(Some(vec![
            StorageItem::Local(PathBuf::from("/projects/a.vbp")),
            StorageItem::Remote("content://docs/b.vbp".to_string()),
            StorageItem::Local(PathBuf::from("/projects/c.vbp")),
        ]));

        let options = FilePickerOpenOptions {
            title: Some("Open Project".to_string()),
            allow_multiple: true,
        };
        let paths = s.open_file_picker(options.clone()).await.unwrap();
        assert_eq!(
            paths,
            Some(vec![
                PathBuf::from("/projects/a.vbp"),
                PathBuf::from("/projects/c.vbp"),
            ])
        );
        assert_eq!(
            platform.picker_calls(),
            vec![PickerCall::Open {
                owner: platform.main_id(),
                options,
            }]
        );
    });
}

#[test]
fn cancelled_open_picker_is_none() {
    run(async {
        let (_platform, s) = strategy();
        let paths = s
            .open_file_picker(FilePickerOpenOptions::default())
            .await
            .unwrap();
        assert_eq!(paths, None);
    });
}

#[test]
fn save_picker_narrows_to_local_path() {
    run(async {
        let (platform, s) = strategy();
        platform.queue_save_result(Some(StorageItem::Local(PathBuf::from("/out/Form1.frm"))));
        platform.queue_save_result(Some(StorageItem::Remote("s3://bucket/x".to_string())));

        let first = s.save_file_picker(FilePickerSaveOptions::default()).await;
        let second = s.save_file_picker(FilePickerSaveOptions::default()).await;
        assert_eq!(first, Ok(Some(PathBuf::from("/out/Form1.frm"))));
        assert_eq!(second, Ok(None));
    });
}

#[test]
fn save_picker_forwards_filters_and_owner() {
    run(async {
        let (platform, s) = strategy();
        let options = FilePickerSaveOptions {
            title: Some("Save Form As".to_string()),
            suggested_file_name: Some("Form1.frm".to_string()),
            filters: vec![FileTypeFilter::new("Form Files", &["*.frm"])],
        };
        s.save_file_picker(options.clone()).await.unwrap();

        assert_eq!(options.filters[0].patterns, vec!["*.frm".to_string()]);
        assert_eq!(
            platform.picker_calls(),
            vec![PickerCall::Save {
                owner: platform.main_id(),
                options,
            }]
        );
    });
}

#[test]
fn managed_windows_are_single_view_only() {
    run(async {
        let (_platform, s) = strategy();
        let window = Arc::new(VirtualWindow::new("W", SurfaceContent::Empty, true));
        let result = s.show_managed_window(window, SurfaceMode::Modal).await;
        assert!(result.unwrap_err().is_unsupported());
    });
}
