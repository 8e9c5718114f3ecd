use super::*;
use crate::kernel::content::ConfirmDialog;

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

fn strategy(settings: ShellSettings) -> Arc<VirtualSurfaceStrategy> {
    Arc::new(VirtualSurfaceStrategy::new(SurfaceHost::new(), settings))
}

#[test]
fn dialog_is_shielded_while_open_and_returns_acceptance() {
    run(async {
        let s = strategy(ShellSettings::default());
        let dialog = Arc::new(ConfirmDialog::new("Project Properties"));

        let task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = dialog.clone();
            async move { s.show_dialog(dialog).await }
        });
        settle().await;

        let layers = s.host().layers();
        assert_eq!(layers.len(), 2);
        assert!(layers[0].1.is_blocker());
        let window = s.host().top_window().unwrap();
        assert_eq!(window.title(), "Project Properties");
        assert!(window.can_close());

        dialog.accept();
        assert_eq!(task.await.unwrap(), Ok(true));
        assert!(s.host().is_empty());
        assert_eq!(dialog.close_requested().handler_count(), 0);
    });
}

#[test]
fn close_button_dismisses_dialog_as_cancelled() {
    run(async {
        let s = strategy(ShellSettings::default());
        let dialog: Arc<dyn Dialog> = Arc::new(ConfirmDialog::new("Options"));

        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move { s.show_dialog(dialog).await }
        });
        settle().await;

        assert!(s.host().top_window().unwrap().press_close_button());
        assert_eq!(task.await.unwrap(), Ok(false));
        assert!(s.host().is_empty());
    });
}

#[test]
fn first_close_request_wins() {
    run(async {
        let s = strategy(ShellSettings::default());
        let dialog = Arc::new(ConfirmDialog::new("Save changes?"));

        let task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = dialog.clone();
            async move { s.show_dialog(dialog).await }
        });
        settle().await;

        dialog.accept();
        dialog.cancel();
        assert_eq!(task.await.unwrap(), Ok(true));
    });
}

#[test]
fn input_box_window_uses_caption_and_hides_close_button() {
    run(async {
        let s = strategy(ShellSettings::default());
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move {
                s.input_box("Name?".into(), "Rename".into(), "Form1".into())
                    .await
            }
        });
        settle().await;

        let window = s.host().top_window().unwrap();
        assert_eq!(window.title(), "Rename");
        assert!(!window.can_close());
        assert!(!window.press_close_button());

        let input = window.content().as_input_box().unwrap().clone();
        assert_eq!(input.text(), "Form1");
        input.set_text("MainForm");
        input.accept();

        assert_eq!(task.await.unwrap(), Ok(Some("MainForm".to_string())));
    });
}

#[test]
fn teardown_gives_message_box_its_dismissed_result() {
    run(async {
        let s = strategy(ShellSettings::default());
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move {
                s.message_box(
                    "Delete?".into(),
                    "Confirm".into(),
                    MessageBoxButtons::YesNo,
                    MessageBoxIcon::Question,
                )
                .await
            }
        });
        settle().await;

        assert_eq!(s.host().teardown(), 1);
        assert_eq!(task.await.unwrap(), Ok(MessageBoxResult::No));
    });
}

#[test]
fn persistent_window_is_unshielded_by_default() {
    run(async {
        let s = strategy(ShellSettings::default());
        let dialog = Arc::new(ConfirmDialog::new("Toolbox"));
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            let dialog: Arc<dyn Dialog> = dialog.clone();
            async move { s.show_window(dialog, Some("Tools".into())).await }
        });
        settle().await;

        assert_eq!(s.host().len(), 1);
        assert!(!s.host().is_shielded());
        assert_eq!(s.host().top_window().unwrap().title(), "Tools");

        dialog.accept();
        assert_eq!(task.await.unwrap(), Ok(()));
        assert!(s.host().is_empty());
    });
}

#[test]
fn persistent_window_can_be_shielded_by_settings() {
    run(async {
        let settings = ShellSettings {
            blocker_for_managed_windows: true,
            ..ShellSettings::default()
        };
        let s = strategy(settings);
        let dialog: Arc<dyn Dialog> = Arc::new(ConfirmDialog::new("Toolbox"));
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move { s.show_window(dialog, None).await }
        });
        settle().await;

        assert_eq!(s.host().len(), 2);
        assert!(s.host().is_shielded());
        s.host().teardown();
        assert_eq!(task.await.unwrap(), Ok(()));
    });
}

#[test]
fn managed_window_cannot_be_shown_twice() {
    run(async {
        let s = strategy(ShellSettings::default());
        let window = Arc::new(VirtualWindow::new("Immediate", SurfaceContent::Empty, true));

        let first = tokio::spawn({
            let s = Arc::clone(&s);
            let window = Arc::clone(&window);
            async move { s.show_managed_window(window, SurfaceMode::Modeless).await }
        });
        settle().await;

        let second = s
            .show_managed_window(Arc::clone(&window), SurfaceMode::Modeless)
            .await;
        assert_eq!(
            second,
            Err(WindowError::AlreadyShown {
                operation: "show_managed_window"
            })
        );

        assert!(window.press_close_button());
        assert_eq!(first.await.unwrap(), Ok(()));
    });
}

#[test]
fn dropping_the_request_removes_its_window() {
    run(async {
        let s = strategy(ShellSettings::default());
        let task = tokio::spawn({
            let s = Arc::clone(&s);
            async move {
                s.input_box("Name?".into(), "Caption".into(), String::new())
                    .await
            }
        });
        settle().await;
        assert_eq!(s.host().len(), 2);

        task.abort();
        let _ = task.await;
        assert!(s.host().is_empty());
    });
}

#[test]
fn file_pickers_are_unsupported() {
    run(async {
        let s = strategy(ShellSettings::default());
        let open = s.open_file_picker(FilePickerOpenOptions::default()).await;
        let save = s.save_file_picker(FilePickerSaveOptions::default()).await;

        assert!(matches!(
            open,
            Err(WindowError::Unsupported {
                environment: EnvironmentKind::SingleView,
                ..
            })
        ));
        assert!(save.unwrap_err().is_unsupported());
    });
}

#[test]
fn window_alignment_follows_settings() {
    run(async {
        for center_windows in [true, false] {
            let s = strategy(ShellSettings {
                center_windows,
                ..ShellSettings::default()
            });
            let dialog = Arc::new(ConfirmDialog::new("Align"));
            let task = tokio::spawn({
                let s = Arc::clone(&s);
                let dialog: Arc<dyn Dialog> = dialog.clone();
                async move { s.show_dialog(dialog).await }
            });
            settle().await;

            assert_eq!(s.host().top_window().unwrap().is_centered(), center_windows);
            dialog.cancel();
            assert_eq!(task.await.unwrap(), Ok(false));
        }
    });
}
