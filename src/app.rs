//! Main application state and UI coordination

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use eframe::egui;

use crate::core::config::{
    AppConfig, APP_NAME, APP_VERSION, AUTOSAVE_DEBOUNCE, PREVIEW_DEBOUNCE,
    SAVED_INDICATOR_DURATION,
};
use crate::core::debounce::Debouncer;
use crate::core::document::Document;
use crate::core::i18n::{t, Language};
use crate::core::settings::{Settings, Theme};
use crate::core::snippets::{example_document, insert_snippet};
use crate::core::storage::Storage;
use crate::core::styles::{StyleCatalog, DEFAULT_STYLE};
use crate::core::{export, import, render};
use crate::offline::{AssetLoader, CacheWorker, WorkerEvent, WorkerMessage};
use crate::ui::editor::{self, EditorPanel};
use crate::ui::find_bar::FindBar;
use crate::ui::preview::{PreviewPanel, PreviewTheme};
use crate::ui::scroll_sync::{Pane, ScrollSync};
use crate::ui::snippets_menu::SnippetsMenu;
use crate::ui::style_editor::{StyleEditor, StyleEditorAction};
use crate::ui::toast::{TimedMessage, Toasts};
use crate::ui::update_banner::UpdateBanner;
use crate::ui::clipboard;

/// View mode for the editor area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Split,
    Editor,
    Preview,
}

impl ViewMode {
    fn panes(self) -> &'static [Pane] {
        match self {
            ViewMode::Split => &[Pane::Editor, Pane::Preview],
            ViewMode::Editor => &[Pane::Editor],
            ViewMode::Preview => &[Pane::Preview],
        }
    }
}

/// User actions from menus, toolbar and shortcuts
#[derive(Debug, Clone, PartialEq)]
enum Command {
    NewDocument,
    Open,
    OpenPath(PathBuf),
    ClearRecent,
    Save,
    ImportWord,
    CopyHtml,
    ExportHtml,
    CopyText,
    Find,
    Replace,
    InsertSnippet(&'static str),
    SetViewMode(ViewMode),
    EditorZoomIn,
    EditorZoomOut,
    EditorZoomReset,
    PreviewZoomIn,
    PreviewZoomOut,
    PreviewZoomReset,
    ToggleTheme,
    SetLanguage(Language),
    SetStyle(String),
    EditStyle,
    About,
    ApplyUpdate,
    Exit,
}

/// Menu entry that queues a command and closes the menu
fn menu_item(ui: &mut egui::Ui, label: &str, command: Command, commands: &mut Vec<Command>) {
    if ui.button(label).clicked() {
        commands.push(command);
        ui.close();
    }
}

/// Word import running on a background thread
struct PendingImport {
    file_name: String,
    rx: Receiver<anyhow::Result<String>>,
}

/// Main application state
pub struct MarkdownEditorApp {
    /// The document being edited
    pub document: Document,
    /// Persisted user settings
    pub settings: Settings,
    /// Built-in and custom styles
    pub styles: StyleCatalog,
    /// Current view mode
    pub view_mode: ViewMode,
    /// Editor selection as a char range, as of the last frame
    pub selection: (usize, usize),
    /// Markdown shown in the preview, refreshed after the debounce delay
    pub preview_source: String,
    /// Commonmark cache for preview
    pub commonmark_cache: egui_commonmark::CommonMarkCache,
    /// Scroll position carried across view-mode switches
    pub scroll_sync: ScrollSync,
    /// Application configuration
    config: AppConfig,
    storage: Storage,
    preview_debounce: Debouncer,
    autosave_debounce: Debouncer,
    saved_indicator: TimedMessage,
    toasts: Toasts,
    find_bar: FindBar,
    style_editor: StyleEditor,
    confirm_new: bool,
    show_about: bool,
    update_banner: UpdateBanner,
    worker: Option<CacheWorker>,
    /// Serves remote images from the worker; absent without a worker
    asset_loader: Option<Arc<AssetLoader>>,
    outstanding_requests: usize,
    import: Option<PendingImport>,
    title: String,
}

impl MarkdownEditorApp {
    /// Create a new application instance
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Ctrl+Plus/Minus/0 drive the editor zoom instead of the UI scale
        cc.egui_ctx.options_mut(|options| options.zoom_with_keyboard = false);
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let config = AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Failed to load config, using defaults: {}", e);
            AppConfig::default()
        });

        let storage = Storage::open_default();
        let mut settings = storage.load_settings();
        let styles = StyleCatalog::new(storage.custom_styles());
        settings.style = styles.resolve(&settings.style).to_string();

        let mut toasts = Toasts::default();
        let content = match storage.load_document() {
            Some(content) => {
                toasts.show(t(settings.lang, "status.restored"));
                content
            }
            None => example_document(settings.lang),
        };

        let worker = CacheWorker::start(&config.offline);
        let asset_loader = worker.as_ref().map(|_| {
            let loader = Arc::new(AssetLoader::default());
            cc.egui_ctx.add_bytes_loader(loader.clone());
            loader
        });

        let mut app = Self {
            preview_source: content.clone(),
            document: Document::new(content),
            settings,
            styles,
            view_mode: ViewMode::default(),
            selection: (0, 0),
            commonmark_cache: egui_commonmark::CommonMarkCache::default(),
            scroll_sync: ScrollSync::default(),
            config,
            storage,
            preview_debounce: Debouncer::new(PREVIEW_DEBOUNCE),
            autosave_debounce: Debouncer::new(AUTOSAVE_DEBOUNCE),
            saved_indicator: TimedMessage::default(),
            toasts,
            find_bar: FindBar::default(),
            style_editor: StyleEditor::default(),
            confirm_new: false,
            show_about: false,
            update_banner: UpdateBanner::default(),
            worker,
            asset_loader,
            outstanding_requests: 0,
            import: None,
            title: String::new(),
        };

        app.apply_theme(&cc.egui_ctx);
        let assets = render::remote_images(&app.document.content);
        app.send_to_worker(WorkerMessage::Install(assets));
        app
    }

    fn lang(&self) -> Language {
        self.settings.lang
    }

    fn toast(&mut self, key: &str) {
        self.toasts.show(t(self.lang(), key));
    }

    fn toast_with(&mut self, key: &str, detail: &str) {
        self.toasts.show(format!("{}: {}", t(self.lang(), key), detail));
    }

    /// Called by the editor panel after each edit
    pub fn on_text_edited(&mut self) {
        let now = Instant::now();
        self.preview_debounce.poke(now);
        self.autosave_debounce.poke(now);
        self.find_bar.refresh(&self.document.content);
    }

    /// Theme derived from the style being previewed (the editor draft, if open)
    pub fn preview_theme(&self) -> PreviewTheme {
        match self.style_editor.draft_css() {
            Some(css) => PreviewTheme::from_css(&css, self.settings.preview_zoom),
            None => PreviewTheme::from_css(
                self.styles.css_for(&self.settings.style),
                self.settings.preview_zoom,
            ),
        }
    }

    fn refresh_preview(&mut self) {
        self.preview_debounce.cancel();
        self.preview_source = self.document.content.clone();
    }

    /// Persist the document and settings now
    fn autosave(&mut self) {
        self.autosave_debounce.cancel();
        let result = self
            .storage
            .save_document(&self.document.content)
            .and_then(|_| self.storage.save_settings(&self.settings));
        match result {
            Ok(()) => {
                tracing::debug!("Autosaved");
                let message = format!("\u{2713} {}", t(self.lang(), "status.autosaved"));
                self.saved_indicator
                    .show(message, SAVED_INDICATOR_DURATION, Instant::now());
            }
            Err(e) => tracing::warn!("Autosave failed: {}", e),
        }
    }

    fn save_settings(&mut self) {
        if let Err(e) = self.storage.save_settings(&self.settings) {
            tracing::warn!("Failed to save settings: {}", e);
        }
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            tracing::warn!("Failed to save config: {}", e);
        }
    }

    /// Replace the whole document text (new document, open, import)
    fn replace_document(&mut self, document: Document) {
        self.document = document;
        self.selection = (0, 0);
        self.refresh_preview();
        self.find_bar.refresh(&self.document.content);
        self.autosave();
    }

    fn apply_theme(&self, ctx: &egui::Context) {
        ctx.set_visuals(match self.settings.theme {
            Theme::Dark => egui::Visuals::dark(),
            Theme::Light => egui::Visuals::light(),
        });
    }

    fn dialog_directory(&self) -> Option<PathBuf> {
        self.document
            .directory()
            .map(Path::to_path_buf)
            .or_else(|| self.config.last_directory.clone())
    }

    fn remember_file(&mut self, path: &Path) {
        self.config.add_recent_file(path.to_path_buf());
        self.save_config();
    }

    // ---- offline cache ----

    fn send_to_worker(&mut self, message: WorkerMessage) {
        let counts = message.expects_reply();
        if let Some(worker) = &self.worker {
            if worker.send(message) && counts {
                self.outstanding_requests += 1;
            }
        }
    }

    /// Pass image requests made by the preview on to the worker
    fn forward_asset_requests(&mut self) {
        let Some(loader) = &self.asset_loader else {
            return;
        };
        for url in loader.take_requests() {
            self.send_to_worker(WorkerMessage::Fetch(url));
        }
    }

    fn poll_worker(&mut self, ctx: &egui::Context) {
        let Some(worker) = &self.worker else {
            return;
        };
        for event in worker.poll() {
            self.update_banner.on_event(&event);
            match event {
                WorkerEvent::Waiting => {
                    tracing::info!("New cache version waiting for activation");
                }
                WorkerEvent::Activated(name) => {
                    tracing::info!("Cache active: {}", name);
                }
                WorkerEvent::Fetched {
                    url,
                    bytes,
                    from_cache,
                } => {
                    tracing::debug!("Asset ready: {} (cached: {})", url, from_cache);
                    self.outstanding_requests = self.outstanding_requests.saturating_sub(1);
                    if let Some(loader) = &self.asset_loader {
                        loader.insert(&url, bytes);
                    }
                    ctx.request_repaint();
                }
                WorkerEvent::FetchFailed { url } => {
                    tracing::debug!("Asset unavailable: {}", url);
                    self.outstanding_requests = self.outstanding_requests.saturating_sub(1);
                    if let Some(loader) = &self.asset_loader {
                        loader.fail(&url, "not reachable and not cached");
                    }
                    ctx.request_repaint();
                }
            }
        }
    }

    // ---- Word import ----

    fn start_import(&mut self, path: PathBuf) {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(import::import_docx(&path));
        });
        self.import = Some(PendingImport { file_name, rx });
    }

    fn poll_import(&mut self) {
        let Some(pending) = &self.import else {
            return;
        };
        let result = match pending.rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return,
            Err(TryRecvError::Disconnected) => Err(anyhow::anyhow!("Import thread stopped")),
        };
        let file_name = pending.file_name.clone();
        self.import = None;

        match result {
            Ok(markdown) => {
                self.replace_document(Document::new(markdown));
                self.toast_with("status.wordimported", &file_name);
            }
            Err(e) => {
                tracing::error!("Word import failed: {:#}", e);
                self.toast("status.worderror");
            }
        }
    }

    // ---- commands ----

    fn open_path(&mut self, path: PathBuf) {
        let is_docx = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("docx"));
        if is_docx {
            self.start_import(path);
            return;
        }

        match Document::open(&path) {
            Ok(document) => {
                let name = document.display_name();
                self.replace_document(document);
                self.remember_file(&path);
                self.toast_with("status.opened", &name);
            }
            Err(e) => {
                tracing::error!("Failed to open document: {:#}", e);
                self.config.remove_recent_file(&path);
                self.save_config();
                self.toast("status.open_error");
            }
        }
    }

    fn save_document(&mut self) {
        let mut dialog = rfd::FileDialog::new()
            .add_filter("Markdown", &["md", "markdown"])
            .add_filter("Text", &["txt"])
            .set_file_name(self.document.display_name());
        if let Some(dir) = self.dialog_directory() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };

        match self.document.save_to(&path) {
            Ok(saved) => {
                self.remember_file(&saved);
                self.toast("status.saved");
            }
            Err(e) => {
                tracing::error!("Failed to save document: {:#}", e);
                self.toast("status.save_error");
            }
        }
    }

    fn full_html(&self) -> String {
        render::render_full_html(
            &self.document.content,
            self.styles.css_for(&self.settings.style),
            "",
        )
    }

    fn export_directory(&self) -> PathBuf {
        self.document
            .directory()
            .map(Path::to_path_buf)
            .or_else(|| {
                directories::UserDirs::new()
                    .and_then(|dirs| dirs.download_dir().map(Path::to_path_buf))
            })
            .unwrap_or_else(std::env::temp_dir)
    }

    fn export_html(&mut self) {
        let html = self.full_html();
        match export::export_html(&html, &self.export_directory(), &self.document.base_name()) {
            Ok(path) => {
                self.toast("status.html_exported");
                if let Err(e) = open::that(&path) {
                    tracing::warn!("Failed to open exported file: {}", e);
                }
            }
            Err(e) => {
                tracing::error!("HTML export failed: {:#}", e);
                self.toast("status.export_error");
            }
        }
    }

    fn insert_snippet(&mut self, ctx: &egui::Context, id: &str) {
        let Some(edit) = insert_snippet(&self.document.content, self.selection, id, self.lang())
        else {
            return;
        };
        self.document.content = edit.text;
        self.selection = (edit.cursor, edit.cursor);
        editor::set_selection(ctx, edit.cursor..edit.cursor);
        editor::focus(ctx);
        self.refresh_preview();
        self.find_bar.refresh(&self.document.content);
        self.autosave();
    }

    fn set_view_mode(&mut self, mode: ViewMode) {
        if mode == self.view_mode {
            return;
        }
        let source = match self.view_mode {
            ViewMode::Preview => Pane::Preview,
            _ => Pane::Editor,
        };
        self.scroll_sync.mirror(source, mode.panes());
        self.view_mode = mode;
    }

    fn apply_style_action(&mut self, action: StyleEditorAction) {
        let key = self.settings.style.clone();
        match action {
            StyleEditorAction::Apply(css) => {
                if self.styles.is_custom(&key) {
                    if let Err(e) = self.storage.save_custom_style(&key, &css) {
                        tracing::warn!("Failed to save style {}: {}", key, e);
                    }
                    self.styles.set_custom(&key, css);
                } else {
                    self.styles.set_override(&key, css);
                }
                self.toast("style.applied");
            }
            StyleEditorAction::SaveAs { name, css } => {
                if let Err(e) = self.storage.save_custom_style(&name, &css) {
                    tracing::warn!("Failed to save style {}: {}", name, e);
                }
                self.styles.set_custom(&name, css);
                self.settings.style = name.clone();
                self.autosave();
                self.toast_with("style.saved", &name);
            }
            StyleEditorAction::Delete => {
                if let Err(e) = self.storage.delete_custom_style(&key) {
                    tracing::warn!("Failed to delete style {}: {}", key, e);
                }
                self.styles.remove_custom(&key);
                self.settings.style = DEFAULT_STYLE.to_string();
                self.autosave();
                self.toast("style.deleted");
            }
        }
    }

    fn run(&mut self, ctx: &egui::Context, command: Command) {
        match command {
            Command::NewDocument => self.confirm_new = true,
            Command::Open => {
                let mut dialog = rfd::FileDialog::new()
                    .add_filter("Markdown", &["md", "markdown", "txt"])
                    .add_filter("Word", &["docx"]);
                if let Some(dir) = self.dialog_directory() {
                    dialog = dialog.set_directory(dir);
                }
                if let Some(path) = dialog.pick_file() {
                    self.open_path(path);
                }
            }
            Command::OpenPath(path) => self.open_path(path),
            Command::ClearRecent => {
                self.config.clear_recent_files();
                self.save_config();
            }
            Command::Save => self.save_document(),
            Command::ImportWord => {
                let mut dialog = rfd::FileDialog::new().add_filter("Word", &["docx"]);
                if let Some(dir) = self.dialog_directory() {
                    dialog = dialog.set_directory(dir);
                }
                if let Some(path) = dialog.pick_file() {
                    self.start_import(path);
                }
            }
            Command::CopyHtml => {
                clipboard::copy_text(ctx, &self.full_html());
                self.toast("status.copied");
            }
            Command::ExportHtml => self.export_html(),
            Command::CopyText => {
                clipboard::copy_text(ctx, &self.document.content);
                self.toast("status.text_copied");
            }
            Command::Find => self.find_bar.open(false),
            Command::Replace => self.find_bar.open(true),
            Command::InsertSnippet(id) => self.insert_snippet(ctx, id),
            Command::SetViewMode(mode) => self.set_view_mode(mode),
            Command::EditorZoomIn => {
                if self.settings.editor_zoom_in() {
                    self.save_settings();
                }
            }
            Command::EditorZoomOut => {
                if self.settings.editor_zoom_out() {
                    self.save_settings();
                }
            }
            Command::EditorZoomReset => {
                self.settings.editor_zoom_reset();
                self.save_settings();
            }
            Command::PreviewZoomIn => {
                if self.settings.preview_zoom_in() {
                    self.save_settings();
                }
            }
            Command::PreviewZoomOut => {
                if self.settings.preview_zoom_out() {
                    self.save_settings();
                }
            }
            Command::PreviewZoomReset => {
                self.settings.preview_zoom_reset();
                self.save_settings();
            }
            Command::ToggleTheme => {
                self.settings.theme = self.settings.theme.toggle();
                self.apply_theme(ctx);
                self.autosave();
            }
            Command::SetLanguage(lang) => {
                self.settings.lang = lang;
                self.autosave();
            }
            Command::SetStyle(key) => {
                self.settings.style = self.styles.resolve(&key).to_string();
                self.autosave();
            }
            Command::EditStyle => {
                let css = self.styles.css_for(&self.settings.style).to_string();
                self.style_editor.open(&css);
            }
            Command::About => self.show_about = true,
            Command::ApplyUpdate => {
                let message = self.update_banner.accept();
                self.send_to_worker(message);
                self.toast("update.done");
            }
            Command::Exit => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
        }
    }

    // ---- input ----

    fn shortcuts(ctx: &egui::Context, commands: &mut Vec<Command>) {
        ctx.input(|i| {
            let ctrl = i.modifiers.command;
            if !ctrl {
                return;
            }
            let shift = i.modifiers.shift;
            let zoom_in = i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals);
            let zoom_out = i.key_pressed(egui::Key::Minus);
            let zoom_reset = i.key_pressed(egui::Key::Num0);

            if i.key_pressed(egui::Key::N) {
                commands.push(Command::NewDocument);
            }
            if i.key_pressed(egui::Key::O) {
                commands.push(Command::Open);
            }
            if i.key_pressed(egui::Key::S) {
                commands.push(Command::Save);
            }
            if i.key_pressed(egui::Key::F) {
                commands.push(Command::Find);
            }
            if i.key_pressed(egui::Key::H) {
                commands.push(Command::Replace);
            }
            match (shift, zoom_in, zoom_out, zoom_reset) {
                (false, true, _, _) => commands.push(Command::EditorZoomIn),
                (false, _, true, _) => commands.push(Command::EditorZoomOut),
                (false, _, _, true) => commands.push(Command::EditorZoomReset),
                (true, true, _, _) => commands.push(Command::PreviewZoomIn),
                (true, _, true, _) => commands.push(Command::PreviewZoomOut),
                (true, _, _, true) => commands.push(Command::PreviewZoomReset),
                _ => {}
            }
        });
    }

    fn dropped_files(ctx: &egui::Context, commands: &mut Vec<Command>) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|file| file.path) {
            commands.push(Command::OpenPath(path));
        }
    }

    // ---- layout ----

    /// Render the top menu bar
    fn render_menu_bar(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        let lang = self.lang();
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button(t(lang, "menu.file"), |ui| {
                    menu_item(ui, t(lang, "menu.new"), Command::NewDocument, commands);
                    menu_item(ui, t(lang, "menu.open"), Command::Open, commands);
                    ui.menu_button(t(lang, "menu.recent"), |ui| {
                        if self.config.recent_files.is_empty() {
                            ui.weak(t(lang, "menu.no_recent"));
                            return;
                        }
                        for path in &self.config.recent_files {
                            let label = path
                                .file_name()
                                .map(|name| name.to_string_lossy().to_string())
                                .unwrap_or_else(|| path.display().to_string());
                            let button = ui.button(label).on_hover_text(path.display().to_string());
                            if button.clicked() {
                                commands.push(Command::OpenPath(path.clone()));
                                ui.close();
                            }
                        }
                        ui.separator();
                        menu_item(ui, t(lang, "menu.clear_recent"), Command::ClearRecent, commands);
                    });
                    menu_item(ui, t(lang, "menu.save"), Command::Save, commands);
                    ui.separator();
                    menu_item(ui, t(lang, "menu.import_word"), Command::ImportWord, commands);
                    menu_item(ui, t(lang, "menu.copy_html"), Command::CopyHtml, commands);
                    menu_item(ui, t(lang, "menu.export_html"), Command::ExportHtml, commands);
                    menu_item(ui, t(lang, "menu.share"), Command::CopyText, commands);
                    ui.separator();
                    menu_item(ui, t(lang, "menu.exit"), Command::Exit, commands);
                });

                ui.menu_button(t(lang, "menu.edit"), |ui| {
                    menu_item(ui, t(lang, "menu.find"), Command::Find, commands);
                    menu_item(ui, t(lang, "menu.replace"), Command::Replace, commands);
                });

                ui.menu_button(t(lang, "menu.view"), |ui| {
                    for (mode, key) in [
                        (ViewMode::Split, "menu.split"),
                        (ViewMode::Editor, "menu.editor_only"),
                        (ViewMode::Preview, "menu.preview_only"),
                    ] {
                        if ui.selectable_label(self.view_mode == mode, t(lang, key)).clicked() {
                            commands.push(Command::SetViewMode(mode));
                            ui.close();
                        }
                    }
                    ui.separator();
                    for (key, command) in [
                        ("menu.zoom_in", Command::EditorZoomIn),
                        ("menu.zoom_out", Command::EditorZoomOut),
                        ("menu.zoom_reset", Command::EditorZoomReset),
                        ("menu.preview_zoom_in", Command::PreviewZoomIn),
                        ("menu.preview_zoom_out", Command::PreviewZoomOut),
                        ("menu.preview_zoom_reset", Command::PreviewZoomReset),
                    ] {
                        if ui.button(t(lang, key)).clicked() {
                            commands.push(command);
                        }
                    }
                    ui.separator();
                    let mut dark = self.settings.theme.is_dark();
                    if ui.checkbox(&mut dark, t(lang, "menu.dark_mode")).changed() {
                        commands.push(Command::ToggleTheme);
                    }
                    ui.menu_button(t(lang, "menu.language"), |ui| {
                        for option in Language::ALL {
                            if ui.selectable_label(lang == option, option.display_name()).clicked() {
                                commands.push(Command::SetLanguage(option));
                                ui.close();
                            }
                        }
                    });
                });

                ui.menu_button(t(lang, "menu.styles"), |ui| {
                    for entry in self.styles.entries() {
                        let selected = entry.key == self.settings.style;
                        if ui.selectable_label(selected, &entry.name).clicked() {
                            commands.push(Command::SetStyle(entry.key));
                            ui.close();
                        }
                    }
                    ui.separator();
                    menu_item(ui, t(lang, "menu.edit_style"), Command::EditStyle, commands);
                });

                ui.menu_button(t(lang, "menu.help"), |ui| {
                    menu_item(ui, t(lang, "menu.about"), Command::About, commands);
                });
            });
        });
    }

    fn render_toolbar(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        let lang = self.lang();
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (icon, key, command) in [
                    ("\u{1F4C4}", "menu.new", Command::NewDocument),
                    ("\u{1F4C2}", "menu.open", Command::Open),
                    ("\u{1F4BE}", "menu.save", Command::Save),
                    ("\u{1F4DD}", "menu.import_word", Command::ImportWord),
                    ("\u{1F4CB}", "menu.copy_html", Command::CopyHtml),
                    ("\u{1F310}", "menu.export_html", Command::ExportHtml),
                    ("\u{1F4E4}", "menu.share", Command::CopyText),
                ] {
                    if ui.button(icon).on_hover_text(t(lang, key)).clicked() {
                        commands.push(command);
                    }
                }
                ui.separator();

                if let Some(id) = SnippetsMenu::show(ui, lang) {
                    commands.push(Command::InsertSnippet(id));
                }
                ui.separator();

                let current = self.styles.name_for(&self.settings.style).to_string();
                egui::ComboBox::from_id_salt("style_select")
                    .selected_text(current)
                    .show_ui(ui, |ui| {
                        for entry in self.styles.entries() {
                            let selected = entry.key == self.settings.style;
                            if ui.selectable_label(selected, &entry.name).clicked() {
                                commands.push(Command::SetStyle(entry.key));
                            }
                        }
                    });
                if ui
                    .button("\u{1F3A8}")
                    .on_hover_text(t(lang, "menu.edit_style"))
                    .clicked()
                {
                    commands.push(Command::EditStyle);
                }
                ui.separator();

                egui::ComboBox::from_id_salt("lang_select")
                    .selected_text(lang.code().to_uppercase())
                    .show_ui(ui, |ui| {
                        for option in Language::ALL {
                            if ui.selectable_label(lang == option, option.display_name()).clicked() {
                                commands.push(Command::SetLanguage(option));
                            }
                        }
                    });
                if ui
                    .button(self.settings.theme.icon())
                    .on_hover_text(t(lang, "menu.dark_mode"))
                    .clicked()
                {
                    commands.push(Command::ToggleTheme);
                }
            });
        });
    }

    fn render_update_banner(&self, ctx: &egui::Context, commands: &mut Vec<Command>) {
        if self.update_banner.show(ctx, self.lang()) {
            commands.push(Command::ApplyUpdate);
        }
    }

    fn render_status_bar(&mut self, ctx: &egui::Context) {
        let lang = self.lang();
        let chars = self.document.char_count();
        let saved = self
            .saved_indicator
            .active(Instant::now())
            .map(str::to_string);
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("{} {}", chars, t(lang, "chars")));
                ui.separator();
                ui.label(self.document.display_name());
                if let Some(saved) = saved {
                    ui.separator();
                    ui.weak(saved);
                }
                if self.import.is_some() {
                    ui.separator();
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!(
                        "{} {}px \u{00B7} {} {}px",
                        t(lang, "panel.preview"),
                        self.settings.preview_zoom,
                        t(lang, "panel.editor"),
                        self.settings.editor_zoom
                    ));
                    ui.separator();
                    ui.label(self.styles.name_for(&self.settings.style));
                });
            });
        });
    }

    fn render_dialogs(&mut self, ctx: &egui::Context) {
        let lang = self.lang();

        if self.confirm_new {
            let mut create = false;
            egui::Window::new(t(lang, "menu.new"))
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label(t(lang, "confirm.new"));
                    ui.horizontal(|ui| {
                        if ui.button(t(lang, "dialog.yes")).clicked() {
                            create = true;
                            self.confirm_new = false;
                        }
                        if ui.button(t(lang, "dialog.no")).clicked() {
                            self.confirm_new = false;
                        }
                    });
                });
            if create {
                self.replace_document(Document::new(example_document(lang)));
                self.toast("status.new");
            }
        }

        if self.show_about {
            let mut open = true;
            egui::Window::new(t(lang, "about.title"))
                .open(&mut open)
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.heading(APP_NAME);
                    ui.label(format!("v{}", APP_VERSION));
                    ui.add_space(8.0);
                    ui.label(t(lang, "about.text"));
                    ui.add_space(8.0);
                    if ui.button(t(lang, "dialog.close")).clicked() {
                        self.show_about = false;
                    }
                });
            if !open {
                self.show_about = false;
            }
        }

        if self.style_editor.is_open() {
            let can_delete = self.styles.is_custom(&self.settings.style);
            if let Some(action) = self.style_editor.show(ctx, lang, can_delete) {
                self.apply_style_action(action);
            }
        }
    }

    fn panel_header(ui: &mut egui::Ui, title: &str) {
        ui.label(egui::RichText::new(title).strong());
        ui.separator();
    }

    fn render_panels(&mut self, ctx: &egui::Context) {
        let lang = self.lang();

        if self.view_mode == ViewMode::Split {
            egui::SidePanel::left("editor_panel")
                .resizable(true)
                .default_width(ctx.screen_rect().width() / 2.0)
                .min_width(200.0)
                .show(ctx, |ui| {
                    Self::panel_header(ui, t(lang, "panel.editor"));
                    self.render_find_bar(ui);
                    EditorPanel::show(ui, self);
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.view_mode {
            ViewMode::Editor => {
                Self::panel_header(ui, t(lang, "panel.editor"));
                self.render_find_bar(ui);
                EditorPanel::show(ui, self);
            }
            ViewMode::Preview | ViewMode::Split => {
                Self::panel_header(ui, t(lang, "panel.preview"));
                PreviewPanel::show(ui, self);
            }
        });
    }

    fn render_find_bar(&mut self, ui: &mut egui::Ui) {
        let lang = self.lang();
        let output = self.find_bar.show(ui, lang, &mut self.document.content);
        if output.edited {
            self.on_text_edited();
        }
        if let Some(range) = output.select {
            self.selection = (range.start, range.end);
            editor::set_selection(ui.ctx(), range);
        }
        if self.find_bar.visible {
            ui.separator();
        }
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let dirty = if self.document.is_dirty() && self.document.path.is_some() {
            "\u{2022} "
        } else {
            ""
        };
        let title = format!("{}{} - {}", dirty, self.document.display_name(), APP_NAME);
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context) {
        let now = Instant::now();
        let next = [
            self.preview_debounce.remaining(now),
            self.autosave_debounce.remaining(now),
            self.saved_indicator.remaining(now),
            self.toasts.remaining(now),
        ]
        .into_iter()
        .flatten()
        .min();

        if let Some(delay) = next {
            ctx.request_repaint_after(delay);
        }
        if self.import.is_some() || (self.worker.is_some() && self.outstanding_requests > 0) {
            ctx.request_repaint_after(Duration::from_millis(200));
        }
    }
}

impl eframe::App for MarkdownEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        if self.preview_debounce.fire(now) {
            tracing::debug!("Preview refresh");
            self.refresh_preview();
        }
        if self.autosave_debounce.fire(now) {
            self.autosave();
        }
        self.poll_worker(ctx);
        self.poll_import();

        // Handle keyboard shortcuts and dropped files
        let mut commands = Vec::new();
        Self::shortcuts(ctx, &mut commands);
        Self::dropped_files(ctx, &mut commands);

        self.render_menu_bar(ctx, &mut commands);
        self.render_toolbar(ctx, &mut commands);
        self.render_update_banner(ctx, &mut commands);
        self.render_status_bar(ctx);
        self.render_panels(ctx);
        self.render_dialogs(ctx);
        self.toasts.ui(ctx);
        self.forward_asset_requests();

        for command in commands {
            self.run(ctx, command);
        }

        if ctx.input(|i| i.viewport().close_requested()) && self.autosave_debounce.is_pending() {
            self.autosave();
        }

        self.update_title(ctx);
        self.schedule_repaint(ctx);
    }
}
