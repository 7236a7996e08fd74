//! The host-facing reading API.

use log::debug;

use crate::book::Catalog;
use crate::config::{FlowSettings, LibrariumConfig};
use crate::error::{Error, Result};
use crate::layout::{FlowArea, Point, TextFlowEngine, TextLayout, TextMeasure};
use crate::session::ReadingSession;

/// A loaded catalog plus the reading session currently open on it, if any.
#[derive(Debug, Clone)]
pub struct Librarium {
    catalog: Catalog,
    session: Option<ReadingSession>,
    engine: TextFlowEngine,
    settings: FlowSettings,
}

impl Librarium {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            session: None,
            engine: TextFlowEngine::new(),
            settings: FlowSettings::default(),
        }
    }

    /// Load the catalog named by `config`.
    pub fn from_config(config: &LibrariumConfig) -> Result<Self> {
        config.validate()?;
        let catalog = Catalog::load(config.catalog_path())?;
        Ok(Self::new(catalog).with_settings(config.flow))
    }

    pub fn with_engine(mut self, engine: TextFlowEngine) -> Self {
        self.engine = engine;
        self
    }

    pub fn with_settings(mut self, settings: FlowSettings) -> Self {
        self.engine = self.engine.with_settings(&settings);
        self.settings = settings;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn engine(&self) -> &TextFlowEngine {
        &self.engine
    }

    pub fn settings(&self) -> &FlowSettings {
        &self.settings
    }

    pub fn session(&self) -> Option<&ReadingSession> {
        self.session.as_ref()
    }

    /// Open the book matching `title` on its first page.
    ///
    /// On failure any previously open book stays open.
    pub fn open_reading(&mut self, title: &str) -> Result<()> {
        let session = ReadingSession::open(&self.catalog, title)?;
        self.session = Some(session);
        Ok(())
    }

    /// Open the book at `index` in catalog order.
    pub fn open_book_at(&mut self, index: usize) -> Result<()> {
        let book = self
            .catalog
            .get(index)
            .ok_or_else(|| Error::BookNotFound(format!("#{index}")))?;
        self.session = Some(ReadingSession::new(book.clone()));
        Ok(())
    }

    /// End the reading session, handing it back to the caller.
    pub fn close_reading(&mut self) -> Option<ReadingSession> {
        let session = self.session.take();
        if let Some(session) = &session {
            debug!("closed \"{}\" on page {}", session.title(), session.page_number());
        }
        session
    }

    pub fn get_book_contents(&self, title: &str) -> Result<String> {
        self.catalog.book_contents(title)
    }

    pub fn current_session(&self) -> Result<&ReadingSession> {
        self.session.as_ref().ok_or(Error::NoBookSelected)
    }

    fn current_session_mut(&mut self) -> Result<&mut ReadingSession> {
        self.session.as_mut().ok_or(Error::NoBookSelected)
    }

    pub fn current_page_number(&self) -> Result<usize> {
        self.current_session().map(ReadingSession::page_number)
    }

    pub fn total_pages(&self) -> Result<usize> {
        self.current_session().map(ReadingSession::total_pages)
    }

    pub fn current_page_text(&self) -> Result<&str> {
        self.current_session()?.current_page_text()
    }

    pub fn next_page(&mut self) -> Result<bool> {
        self.current_session_mut().map(ReadingSession::next_page)
    }

    pub fn prev_page(&mut self) -> Result<bool> {
        self.current_session_mut().map(ReadingSession::prev_page)
    }

    pub fn go_to_page(&mut self, number: usize) -> Result<bool> {
        Ok(self.current_session_mut()?.go_to_page(number))
    }

    /// Lay out the current page in a viewport anchored at the origin.
    pub fn get_current_page_layout<M>(
        &self,
        measure: &M,
        viewport_width: f32,
        viewport_height: f32,
    ) -> Result<TextLayout>
    where
        M: TextMeasure + ?Sized,
    {
        let text = self.current_page_text()?;
        let area = FlowArea::new(
            Point::default(),
            viewport_width,
            viewport_height,
            self.settings.line_height,
        );
        Ok(self.engine.layout(text, measure, &area))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::book::Book;

    fn library() -> Librarium {
        Librarium::new(Catalog::new(vec![
            Book::new("Lilia").with_page("A short tale ").with_page("of wrapping."),
            Book::new("Lilia's Sequel").with_page("Again."),
        ]))
    }

    #[test]
    fn test_page_access_requires_open_book() {
        let mut library = library();
        assert!(matches!(library.current_page_number(), Err(Error::NoBookSelected)));
        assert!(matches!(library.next_page(), Err(Error::NoBookSelected)));
        let measure = |text: &str| text.len() as f32;
        assert!(matches!(
            library.get_current_page_layout(&measure, 100.0, 100.0),
            Err(Error::NoBookSelected)
        ));
    }

    #[test]
    fn test_failed_open_keeps_current_book() {
        let mut library = library();
        library.open_book_at(0).unwrap();
        library.next_page().unwrap();
        assert!(library.open_reading("nonexistent").is_err());
        assert_eq!(library.current_session().unwrap().title(), "Lilia");
        assert_eq!(library.current_page_number().unwrap(), 2);
    }

    #[test]
    fn test_open_book_at_avoids_title_ambiguity() {
        let mut library = library();
        library.open_reading("lilia").unwrap();
        assert_eq!(library.current_session().unwrap().title(), "Lilia's Sequel");

        library.open_book_at(0).unwrap();
        assert_eq!(library.current_session().unwrap().title(), "Lilia");
        assert!(library.open_book_at(5).is_err());
    }

    #[test]
    fn test_close_reading() {
        let mut library = library();
        library.open_book_at(0).unwrap();
        let session = library.close_reading().unwrap();
        assert_eq!(session.title(), "Lilia");
        assert!(library.session().is_none());
        assert!(library.close_reading().is_none());
    }

    #[test]
    fn test_layout_uses_configured_line_height() {
        let mut library = library().with_settings(FlowSettings {
            line_height: 10.0,
            ..FlowSettings::default()
        });
        library.open_book_at(0).unwrap();
        let measure = |text: &str| text.chars().count() as f32;
        let layout = library.get_current_page_layout(&measure, 8.0, 100.0).unwrap();
        let ys: Vec<f32> = layout.tokens.iter().map(|t| t.y).collect();
        assert_eq!(ys, vec![0.0, 0.0, 10.0]);
    }
}
