//! Translated UI strings
//!
//! Keys use dot notation (`status.saved`, `menu.file`). A key missing from a
//! table resolves to itself so an untranslated string is visible rather than
//! blank. Values may carry `{name}` placeholders filled by [`tr`].

use serde::{Deserialize, Serialize};

/// Supported UI languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::Es, Language::En];

    pub fn code(self) -> &'static str {
        match self {
            Language::Es => "es",
            Language::En => "en",
        }
    }

    /// Name shown in the language selector
    pub fn display_name(self) -> &'static str {
        match self {
            Language::Es => "Español / Spanish",
            Language::En => "English",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim().to_ascii_lowercase();
        match code.get(..2)? {
            "es" => Some(Language::Es),
            "en" => Some(Language::En),
            _ => None,
        }
    }

    /// Language from the process locale, if it is one we ship
    pub fn detect() -> Option<Self> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|value| !value.is_empty())
            .and_then(|value| Self::from_code(&value))
    }

    fn table(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Language::Es => ES,
            Language::En => EN,
        }
    }
}

/// Look up a translated string
pub fn t(lang: Language, key: &str) -> &str {
    lang.table()
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
        .unwrap_or(key)
}

/// Look up a translated string and substitute `{name}` placeholders
pub fn tr(lang: Language, key: &str, args: &[(&str, &str)]) -> String {
    let mut text = t(lang, key).to_string();
    for (name, value) in args {
        text = text.replace(&format!("{{{}}}", name), value);
    }
    text
}

static ES: &[(&str, &str)] = &[
    ("panel.editor", "Editor Markdown"),
    ("panel.preview", "Vista previa"),
    ("status.ready", "Listo"),
    ("status.autosaved", "Autoguardado"),
    ("status.copied", "HTML copiado"),
    ("status.text_copied", "Texto copiado"),
    ("status.saved", "Archivo guardado"),
    ("status.opened", "Archivo abierto"),
    ("status.new", "Nuevo documento"),
    ("status.restored", "Documento restaurado"),
    ("status.wordimported", "Word importado"),
    ("status.worderror", "Error al convertir el documento Word"),
    ("status.open_error", "No se pudo abrir el archivo"),
    ("status.save_error", "No se pudo guardar el archivo"),
    ("status.html_exported", "HTML exportado"),
    ("status.export_error", "No se pudo exportar el HTML"),
    ("chars", "caracteres"),
    ("confirm.new", "Crear nuevo documento?"),
    ("update.available", "Nueva version disponible. Pulsa para actualizar."),
    ("update.done", "Actualizado a la ultima version"),
    ("menu.file", "Archivo"),
    ("menu.new", "Nuevo"),
    ("menu.open", "Abrir..."),
    ("menu.recent", "Recientes"),
    ("menu.no_recent", "Sin archivos recientes"),
    ("menu.clear_recent", "Limpiar recientes"),
    ("menu.save", "Guardar..."),
    ("menu.import_word", "Importar Word..."),
    ("menu.copy_html", "Copiar HTML"),
    ("menu.export_html", "Exportar HTML"),
    ("menu.share", "Copiar texto"),
    ("menu.exit", "Salir"),
    ("menu.edit", "Editar"),
    ("menu.find", "Buscar"),
    ("menu.replace", "Reemplazar"),
    ("menu.view", "Ver"),
    ("menu.split", "Vista dividida"),
    ("menu.editor_only", "Solo editor"),
    ("menu.preview_only", "Solo vista previa"),
    ("menu.zoom_in", "Aumentar zoom del editor"),
    ("menu.zoom_out", "Reducir zoom del editor"),
    ("menu.zoom_reset", "Restablecer zoom del editor"),
    ("menu.preview_zoom_in", "Aumentar zoom de la vista previa"),
    ("menu.preview_zoom_out", "Reducir zoom de la vista previa"),
    ("menu.preview_zoom_reset", "Restablecer zoom de la vista previa"),
    ("menu.dark_mode", "Modo oscuro"),
    ("menu.language", "Idioma"),
    ("menu.styles", "Estilos"),
    ("menu.edit_style", "Editar estilo..."),
    ("menu.help", "Ayuda"),
    ("menu.about", "Acerca de"),
    ("snippets.title", "Insertar"),
    ("snippets.headers", "Encabezados"),
    ("snippets.format", "Formato"),
    ("snippets.lists", "Listas"),
    ("snippets.blocks", "Bloques"),
    ("snippets.callouts", "Avisos"),
    ("style.editor_title", "Editor de estilos"),
    ("style.element", "Elemento"),
    ("style.mode", "Modo"),
    ("style.basic", "Basico"),
    ("style.advanced", "Avanzado"),
    ("style.font", "Fuente"),
    ("style.size", "Tamano"),
    ("style.color", "Color"),
    ("style.bgcolor", "Fondo"),
    ("style.weight", "Grosor"),
    ("style.fontstyle", "Estilo de fuente"),
    ("style.lineheight", "Interlineado"),
    ("style.margin", "Margen"),
    ("style.padding", "Relleno"),
    ("style.border", "Borde"),
    ("style.borderleft", "Borde izquierdo"),
    ("style.borderbottom", "Borde inferior"),
    ("style.radius", "Radio del borde"),
    ("style.align", "Alineacion"),
    ("style.decoration", "Decoracion"),
    ("style.apply", "Aplicar"),
    ("style.save_as", "Guardar como..."),
    ("style.delete", "Eliminar estilo"),
    ("style.cancel", "Cancelar"),
    ("style.entername", "Nombre del estilo"),
    ("style.applied", "Estilo aplicado"),
    ("style.saved", "Estilo guardado"),
    ("style.deleted", "Estilo eliminado"),
    ("find.placeholder", "Buscar..."),
    ("find.replace_placeholder", "Reemplazar con..."),
    ("find.replace", "Reemplazar"),
    ("find.replace_all", "Todo"),
    ("find.case_sensitive", "Aa"),
    ("find.no_results", "Sin resultados"),
    ("find.count", "{current} de {total}"),
    ("dialog.yes", "Si"),
    ("dialog.no", "No"),
    ("dialog.close", "Cerrar"),
    ("dialog.ok", "Aceptar"),
    ("about.title", "Acerca de"),
    ("about.text", "Editor Markdown con vista previa en vivo, estilos y funcionamiento sin conexion."),
    ("example.title", "Bienvenido a Markdown Editor"),
    ("example.intro", "Este editor funciona **100% offline** y guarda automaticamente tu trabajo."),
    ("example.section.format", "Formato de texto"),
    ("example.section.lists", "Listas"),
    ("example.section.table", "Tabla"),
    ("example.section.code", "Codigo"),
    ("example.section.quote", "Cita"),
    ("example.section.callouts", "Avisos"),
    ("example.footer", "Documento generado con Markdown Editor"),
];

static EN: &[(&str, &str)] = &[
    ("panel.editor", "Markdown Editor"),
    ("panel.preview", "Preview"),
    ("status.ready", "Ready"),
    ("status.autosaved", "Autosaved"),
    ("status.copied", "HTML copied"),
    ("status.text_copied", "Text copied"),
    ("status.saved", "File saved"),
    ("status.opened", "File opened"),
    ("status.new", "New document"),
    ("status.restored", "Document restored"),
    ("status.wordimported", "Word imported"),
    ("status.worderror", "Error converting Word document"),
    ("status.open_error", "Could not open file"),
    ("status.save_error", "Could not save file"),
    ("status.html_exported", "HTML exported"),
    ("status.export_error", "Could not export HTML"),
    ("chars", "characters"),
    ("confirm.new", "Create new document?"),
    ("update.available", "New version available. Click to update."),
    ("update.done", "Updated to latest version"),
    ("menu.file", "File"),
    ("menu.new", "New"),
    ("menu.open", "Open..."),
    ("menu.recent", "Recent files"),
    ("menu.no_recent", "No recent files"),
    ("menu.clear_recent", "Clear recent files"),
    ("menu.save", "Save..."),
    ("menu.import_word", "Import Word..."),
    ("menu.copy_html", "Copy HTML"),
    ("menu.export_html", "Export HTML"),
    ("menu.share", "Copy text"),
    ("menu.exit", "Exit"),
    ("menu.edit", "Edit"),
    ("menu.find", "Find"),
    ("menu.replace", "Replace"),
    ("menu.view", "View"),
    ("menu.split", "Split view"),
    ("menu.editor_only", "Editor only"),
    ("menu.preview_only", "Preview only"),
    ("menu.zoom_in", "Editor zoom in"),
    ("menu.zoom_out", "Editor zoom out"),
    ("menu.zoom_reset", "Reset editor zoom"),
    ("menu.preview_zoom_in", "Preview zoom in"),
    ("menu.preview_zoom_out", "Preview zoom out"),
    ("menu.preview_zoom_reset", "Reset preview zoom"),
    ("menu.dark_mode", "Dark mode"),
    ("menu.language", "Language"),
    ("menu.styles", "Styles"),
    ("menu.edit_style", "Edit style..."),
    ("menu.help", "Help"),
    ("menu.about", "About"),
    ("snippets.title", "Insert"),
    ("snippets.headers", "Headers"),
    ("snippets.format", "Format"),
    ("snippets.lists", "Lists"),
    ("snippets.blocks", "Blocks"),
    ("snippets.callouts", "Callouts"),
    ("style.editor_title", "Style editor"),
    ("style.element", "Element"),
    ("style.mode", "Mode"),
    ("style.basic", "Basic"),
    ("style.advanced", "Advanced"),
    ("style.font", "Font"),
    ("style.size", "Size"),
    ("style.color", "Color"),
    ("style.bgcolor", "Background"),
    ("style.weight", "Weight"),
    ("style.fontstyle", "Font style"),
    ("style.lineheight", "Line height"),
    ("style.margin", "Margin"),
    ("style.padding", "Padding"),
    ("style.border", "Border"),
    ("style.borderleft", "Left border"),
    ("style.borderbottom", "Bottom border"),
    ("style.radius", "Border radius"),
    ("style.align", "Alignment"),
    ("style.decoration", "Decoration"),
    ("style.apply", "Apply"),
    ("style.save_as", "Save as..."),
    ("style.delete", "Delete style"),
    ("style.cancel", "Cancel"),
    ("style.entername", "Style name"),
    ("style.applied", "Style applied"),
    ("style.saved", "Style saved"),
    ("style.deleted", "Style deleted"),
    ("find.placeholder", "Find..."),
    ("find.replace_placeholder", "Replace with..."),
    ("find.replace", "Replace"),
    ("find.replace_all", "All"),
    ("find.case_sensitive", "Aa"),
    ("find.no_results", "No results"),
    ("find.count", "{current} of {total}"),
    ("dialog.yes", "Yes"),
    ("dialog.no", "No"),
    ("dialog.close", "Close"),
    ("dialog.ok", "OK"),
    ("about.title", "About"),
    ("about.text", "Markdown editor with live preview, styles and offline operation."),
    ("example.title", "Welcome to Markdown Editor"),
    ("example.intro", "This editor works **100% offline** and saves your work automatically."),
    ("example.section.format", "Text formatting"),
    ("example.section.lists", "Lists"),
    ("example.section.table", "Table"),
    ("example.section.code", "Code"),
    ("example.section.quote", "Quote"),
    ("example.section.callouts", "Callouts"),
    ("example.footer", "Document generated with Markdown Editor"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_and_fallback() {
        assert_eq!(t(Language::En, "status.saved"), "File saved");
        assert_eq!(t(Language::Es, "status.saved"), "Archivo guardado");
        assert_eq!(t(Language::En, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_placeholders() {
        let text = tr(Language::En, "find.count", &[("current", "3"), ("total", "15")]);
        assert_eq!(text, "3 of 15");
    }

    #[test]
    fn test_tables_share_keys() {
        for (key, _) in ES {
            assert!(EN.iter().any(|(k, _)| k == key), "missing en key {}", key);
        }
        for (key, _) in EN {
            assert!(ES.iter().any(|(k, _)| k == key), "missing es key {}", key);
        }
    }

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("es_ES.UTF-8"), Some(Language::Es));
        assert_eq!(Language::from_code("en"), Some(Language::En));
        assert_eq!(Language::from_code("fr_FR"), None);
        assert_eq!(Language::from_code("e"), None);
    }

    #[test]
    fn test_serde_codes() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), "\"en\"");
        let lang: Language = serde_json::from_str("\"es\"").unwrap();
        assert_eq!(lang, Language::Es);
    }
}
