//! End-to-end interaction sequences through the public API.

use dropconv_core::machine::{CANCELLED_MESSAGE, ONE_FILE_MESSAGE};
use dropconv_core::{
    Effect, Event, Mode, Presentation, SelectedFile, ThemeState, UploadFailure, Widget,
    WidgetConfig, human_file_size,
};

fn notices(effects: &[Effect]) -> Vec<String> {
    effects
        .iter()
        .filter_map(|e| match e {
            Effect::Notify(m) => Some(m.clone()),
            _ => None,
        })
        .collect()
}

#[test]
fn convert_download_then_convert_again() {
    let mut widget = Widget::new(WidgetConfig::default());

    // Drag in with nested enter/leave noise, then drop.
    widget.handle(Event::DragEnter);
    widget.handle(Event::DragEnter);
    widget.handle(Event::DragLeave);
    assert!(widget.is_dragover());
    let effects = widget.handle(Event::FilesDropped(vec![SelectedFile::new(
        "简体.epub",
        2 * 1024 * 1024,
    )]));
    assert_eq!(effects, vec![Effect::FileAccepted]);

    let view = Presentation::of(&widget, ThemeState::default());
    assert_eq!(view.header, "简体.epub");
    assert_eq!(view.description, "File size: 2.0 MiB");
    assert!(!view.dragover);

    assert_eq!(
        widget.handle(Event::Submit).last(),
        Some(&Effect::StartUpload)
    );
    for sent in [0.0, 512.0, 1024.0] {
        widget.handle(Event::Progress {
            loaded: sent,
            total: 1024.0,
        });
    }
    assert!(widget.is_processing());

    widget.handle(Event::Succeeded {
        download_url: "blob:first".into(),
        content_disposition: Some(
            "attachment; filename*=UTF-8''%E7%B9%81%E9%AB%94.epub".into(),
        ),
    });
    let view = Presentation::of(&widget, ThemeState::default());
    assert_eq!(view.data_mode, "converted");
    assert_eq!(view.download_name.as_deref(), Some("繁體.epub"));

    // Converting the same file again releases the first result.
    let effects = widget.handle(Event::Submit);
    assert!(effects.contains(&Effect::RevokeObjectUrl("blob:first".into())));
    widget.handle(Event::Succeeded {
        download_url: "blob:second".into(),
        content_disposition: None,
    });
    assert_eq!(
        widget.download().map(|d| d.url.as_str()),
        Some("blob:second")
    );

    // Closing releases the second one and returns to the empty state.
    let effects = widget.handle(Event::Close);
    assert!(effects.contains(&Effect::RevokeObjectUrl("blob:second".into())));
    let view = Presentation::of(&widget, ThemeState::default());
    assert_eq!(view.data_mode, "selecting");
    assert_eq!(
        view.hint,
        Some(format!(
            "Max upload size: {}",
            human_file_size(WidgetConfig::default().size_limit, false)
        ))
    );
    assert_eq!(view.download_href, None);
}

#[test]
fn cancel_mid_upload_then_pick_again() {
    let mut widget = Widget::new(WidgetConfig::default());
    widget.handle(Event::FilesPicked(vec![SelectedFile::new("a.epub", 10)]));
    widget.handle(Event::Submit);
    widget.handle(Event::Progress {
        loaded: 3.0,
        total: 10.0,
    });

    let effects = widget.handle(Event::Close);
    assert_eq!(effects.first(), Some(&Effect::CancelUpload));
    assert_eq!(notices(&effects), [CANCELLED_MESSAGE]);
    assert_eq!(widget.mode(), Mode::Selecting);
    assert!(!widget.is_negative());

    widget.handle(Event::FilesPicked(vec![SelectedFile::new("b.epub", 10)]));
    assert_eq!(widget.mode(), Mode::Selected);
    assert_eq!(widget.progress(), 0.0);

    // The abort of the first upload is reported after the new pick.
    let effects = widget.handle(Event::Failed(UploadFailure::Cancelled));
    assert!(notices(&effects).is_empty());
    let view = Presentation::of(&widget, ThemeState::default());
    assert_eq!(view.header, "b.epub");
    assert_eq!(view.data_mode, "selected");
    assert!(view.can_submit);
}

#[test]
fn rejections_never_change_mode() {
    let config = WidgetConfig {
        size_limit: 100,
        ..WidgetConfig::default()
    };
    let mut widget = Widget::new(config);

    let cases = [
        Event::FilesPicked(vec![SelectedFile::new("a.txt", 1)]),
        Event::FilesDropped(vec![SelectedFile::new("a.EPUB", 1)]),
        Event::FilesPicked(vec![SelectedFile::new("a.epub", 100)]),
        Event::FilesDropped(vec![SelectedFile::new("a.epub", u64::MAX)]),
        Event::FilesPicked(vec![
            SelectedFile::new("a.epub", 1),
            SelectedFile::new("b.epub", 1),
        ]),
    ];
    for event in cases {
        let effects = widget.handle(event);
        assert_eq!(widget.mode(), Mode::Selecting);
        assert_eq!(notices(&effects).len(), 1);
        assert!(!effects.contains(&Effect::FileAccepted));
    }

    let effects = widget.handle(Event::FilesDropped(vec![
        SelectedFile::new("a.epub", 1),
        SelectedFile::new("b.epub", 1),
    ]));
    assert_eq!(notices(&effects), [ONE_FILE_MESSAGE]);
}

#[test]
fn server_error_then_retry_succeeds() {
    let mut widget = Widget::new(WidgetConfig::default());
    widget.handle(Event::FilesPicked(vec![SelectedFile::new("a.epub", 10)]));
    widget.handle(Event::Submit);
    let effects = widget.handle(Event::Failed(UploadFailure::Server {
        status: 500,
        content_type: Some("application/json".into()),
        body: Some(r#"{"status": false, "error": "BadZipFile"}"#.into()),
    }));
    assert_eq!(notices(&effects), ["Error: BadZipFile"]);
    let view = Presentation::of(&widget, ThemeState::default());
    assert!(view.negative);
    assert!(view.can_submit);

    widget.handle(Event::Submit);
    assert!(!widget.is_negative());
    widget.handle(Event::Succeeded {
        download_url: "blob:ok".into(),
        content_disposition: Some("attachment; filename=a.epub".into()),
    });
    assert_eq!(widget.mode(), Mode::Converted);
}
