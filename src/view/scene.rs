use log::{debug, warn};

use super::{
    BackgroundView, BookListView, ContentView, PageIndicatorView, Rect, Renderable, Surface,
    TitleView,
};
use crate::config::LibrariumConfig;
use crate::error::{Error, Result};
use crate::layout::TextLayout;
use crate::library::Librarium;

const TITLE_HEIGHT: f32 = 75.0;
const LIST_TITLE_HEIGHT: f32 = 125.0;
const PAGE_INDICATOR_HEIGHT: f32 = 125.0;
const BOOK_LIST_WIDTH: f32 = 150.0;

/// How the book screen is divided between views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutPreset {
    /// Title, page content and page indicator stacked full-width.
    #[default]
    Default,
    /// A column of catalog titles on the left of the default layout.
    WithBookList,
}

/// Discrete input delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationEvent {
    Advance,
    Retreat,
    SelectUp,
    SelectDown,
    Confirm,
    Exit,
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneControl {
    Continue,
    Exit,
}

/// Composes the book views and routes navigation to the reading session.
#[derive(Debug, Clone)]
pub struct BookScene {
    preset: LayoutPreset,
    background: Option<BackgroundView>,
    book_list: Option<BookListView>,
    title: TitleView,
    content: ContentView,
    page_indicator: PageIndicatorView,
}

impl BookScene {
    pub fn new(screen: Rect, preset: LayoutPreset) -> Self {
        let Rect {
            x,
            y,
            width,
            height,
        } = screen;

        match preset {
            LayoutPreset::Default => Self {
                preset,
                background: None,
                book_list: None,
                title: TitleView::new(Rect::new(x, y, width, TITLE_HEIGHT)),
                content: ContentView::new(Rect::new(
                    x,
                    y + TITLE_HEIGHT,
                    width,
                    height - TITLE_HEIGHT - PAGE_INDICATOR_HEIGHT,
                )),
                page_indicator: PageIndicatorView::new(Rect::new(
                    x,
                    y + height - PAGE_INDICATOR_HEIGHT,
                    width,
                    PAGE_INDICATOR_HEIGHT,
                )),
            },
            LayoutPreset::WithBookList => {
                let column_x = x + BOOK_LIST_WIDTH;
                let column_width = width - BOOK_LIST_WIDTH;
                Self {
                    preset,
                    background: None,
                    book_list: Some(BookListView::new(Rect::new(x, y, BOOK_LIST_WIDTH, height))),
                    title: TitleView::new(Rect::new(column_x, y, column_width, LIST_TITLE_HEIGHT)),
                    content: ContentView::new(Rect::new(
                        column_x,
                        y + LIST_TITLE_HEIGHT,
                        column_width,
                        height - LIST_TITLE_HEIGHT - PAGE_INDICATOR_HEIGHT,
                    )),
                    page_indicator: PageIndicatorView::new(Rect::new(
                        column_x,
                        y + height - PAGE_INDICATOR_HEIGHT,
                        column_width,
                        PAGE_INDICATOR_HEIGHT,
                    )),
                }
            }
        }
    }

    /// A scene with the background the config asks for.
    pub fn from_config(screen: Rect, preset: LayoutPreset, config: &LibrariumConfig) -> Self {
        let scene = Self::new(screen, preset);
        if config.include_background {
            scene.with_background(screen, config.background_image.clone())
        } else {
            scene
        }
    }

    pub fn with_background(mut self, screen: Rect, image: impl Into<String>) -> Self {
        self.background = Some(BackgroundView::new(screen, image));
        self
    }

    pub fn preset(&self) -> LayoutPreset {
        self.preset
    }

    pub fn title_view(&self) -> &TitleView {
        &self.title
    }

    pub fn content_view(&self) -> &ContentView {
        &self.content
    }

    pub fn page_indicator(&self) -> &PageIndicatorView {
        &self.page_indicator
    }

    pub fn book_list(&self) -> Option<&BookListView> {
        self.book_list.as_ref()
    }

    pub fn background(&self) -> Option<&BackgroundView> {
        self.background.as_ref()
    }

    /// The page layout drawn by the last render.
    pub fn content_layout(&self) -> Option<&TextLayout> {
        self.content.layout()
    }

    /// Views in draw order.
    fn views_mut(&mut self) -> Vec<&mut dyn Renderable> {
        let mut views: Vec<&mut dyn Renderable> = Vec::with_capacity(5);
        if let Some(background) = self.background.as_mut() {
            views.push(background);
        }
        if let Some(book_list) = self.book_list.as_mut() {
            views.push(book_list);
        }
        views.push(&mut self.title);
        views.push(&mut self.content);
        views.push(&mut self.page_indicator);
        views
    }

    /// Prepare every view. The default layout needs an open book; the
    /// book-list layout can start without one.
    pub fn create(&mut self, library: &Librarium) -> Result<()> {
        if self.preset == LayoutPreset::Default && library.session().is_none() {
            return Err(Error::NoBookSelected);
        }
        for view in self.views_mut() {
            view.create(library);
        }
        Ok(())
    }

    /// Apply one input event.
    pub fn handle(&mut self, library: &mut Librarium, event: NavigationEvent) -> SceneControl {
        match event {
            NavigationEvent::Advance => {
                if let Err(err) = library.next_page() {
                    debug!("ignoring page turn: {err}");
                }
            }
            NavigationEvent::Retreat => {
                if let Err(err) = library.prev_page() {
                    debug!("ignoring page turn: {err}");
                }
            }
            NavigationEvent::SelectUp => {
                if let Some(book_list) = self.book_list.as_mut() {
                    book_list.select_prev();
                }
            }
            NavigationEvent::SelectDown => {
                if let Some(book_list) = self.book_list.as_mut() {
                    book_list.select_next();
                }
            }
            NavigationEvent::Confirm => {
                if let Some(book_list) = self.book_list {
                    match library.open_book_at(book_list.selected()) {
                        Ok(()) => {
                            self.title.create(library);
                            self.content.create(library);
                        }
                        Err(err) => warn!("cannot open selected book: {err}"),
                    }
                }
            }
            NavigationEvent::Exit => {
                library.close_reading();
                self.dispose();
                return SceneControl::Exit;
            }
        }
        SceneControl::Continue
    }

    /// Redraw every view.
    pub fn render(&mut self, library: &Librarium, surface: &mut dyn Surface) {
        for view in self.views_mut() {
            view.update(library, surface);
        }
    }

    pub fn dispose(&mut self) {
        for view in self.views_mut() {
            view.dispose();
        }
    }
}
