//! Card Templates Module
//!
//! Markup is produced with Handlebars from templates embedded in the binary.
//! Every `{{value}}` is HTML-escaped, so titles and overviews coming from the
//! backend cannot inject markup.
//!
//! Cards are rendered when the page is serialized, from the card's view plus
//! the document's current state (star widget, lazy image marker, rating
//! panel). Carousels and modals are rendered once when they are created.

use crate::dom::{Document, RatingPanel, Unit, UnitContent};
use crate::ratings::StarWidget;
use handlebars::{Handlebars, RenderError, TemplateError};
use serde::Serialize;

pub(crate) const STAR_CARD: &str = "card.star";
pub(crate) const POSTER_CARD: &str = "card.poster";
pub(crate) const SIMPLE_CARD: &str = "card.simple";
const CAROUSEL: &str = "carousel";
const DETAIL: &str = "detail";
const RATING_PANEL: &str = "rating.panel";

const STAR_CARD_TEMPLATE: &str = r##"<div class="col-6 col-md-4 col-lg-3 px-0 mx-0">
  <div id="{{card_id}}" class="card h-100 mb-1 border-black text-white bg-dark" movie-id="{{movie_id}}">
    <div class="card-header border-dark" style="background: url({{poster}}); background-position: center center; background-size: contain; background-repeat: no-repeat; min-height: 250px; max-height: 400px;"></div>
    <div class="card-body my-1 py-1 my-md-2 text-center">
      <h6 class="card-title mb-0">{{title_kr}} ({{release_year}})</h6>
    </div>
    <div class="text-center mt-0 mb-3" id="{{rating_id}}">{{#if stars}}<div class="star-rating" data-initial-rating="{{stars.score}}" data-hover-color="{{stars.hover_color}}" data-gradient-start="{{stars.hover_color}}" data-gradient-end="{{stars.rated_color}}"></div>{{/if}}</div>
  </div>
</div>"##;

const POSTER_CARD_TEMPLATE: &str = r##"<div class="col-4 col-lg-3 px-0 mx-0 my-0 my-lg-1">
  <div id="{{card_id}}" class="card h-100 my-0 mx-1 mx-md-2 mx-lg-3 bg-dark text-light" movie-id="{{movie_id}}">
    <div class="card-header card-clickable h-100 movie-poster border-dark" style="background: url({{poster}}); background-position: center center; background-size: contain; background-repeat: no-repeat; min-height: 150px;"></div>
  </div>
</div>"##;

const SIMPLE_CARD_TEMPLATE: &str = r##"<div class="col-4 col-lg-3 px-0 mx-0">
  <div id="{{card_id}}" class="card h-100 mx-0 my-0 bg-dark text-light" movie-id="{{movie_id}}">
    <div class="{{#if lazy}}lazy-load {{/if}}card-header card-clickable h-100 mx-1 mx-md-2 mx-lg-3 border-dark" style="background: url({{poster}}); background-position: center center; background-size: contain; background-repeat: no-repeat; min-height: 160px;"></div>
    <div class="card-body mx-auto my-auto px-0 pt-0 pb-1 text-center" style="min-height: 60px;">
      <p class="h6 card-title mb-0">{{title_kr}} ({{release_year}})</p>
    </div>
  </div>
</div>"##;

const CAROUSEL_TEMPLATE: &str = r##"<div class="carousel container-wrapper mt-3" container-id="{{index}}">
  <div class="text-light ml-3 mb-2">
    <span class="h4">{{label}}</span>
    <span class="h5">({{count}}개)</span>
  </div>
  <span class="carousel-control-prev arrow-left" role="button" style="width: 20px;">
    <span class="carousel-control-prev-icon" aria-hidden="true"></span>
  </span>
  <div id="{{inner_id}}" class="card-container d-flex"></div>
  <span class="carousel-control-next arrow-right" role="button" style="width: 20px;">
    <span class="carousel-control-next-icon" aria-hidden="true"></span>
  </span>
</div>"##;

const DETAIL_TEMPLATE: &str = r##"<div id="{{modal_id}}" class="modal">
  <div class="modal-dialog modal-dialog-centered modal-lg" role="document">
    <div class="modal-content">
      <div id="{{card_id}}" class="card bg-dark text-light">
        <div class="card-header px-0 py-0 border-dark" style="background: url({{poster}}); background-position: center center; background-size: cover; height: 25vh;"></div>
        <div class="card-body pb-0">
          <span class="text-center">
            <h4 class="card-title">{{title_kr}}</h4>
            <h5 class="card-subtitle mb-3">({{title}}, {{release_year}})</h5>
          </span>
          <p class="mb-1">장르: {{genres}}</p>
          <p class="mb-1">상영시간: {{runtime}}분</p>
          <p class="mb-1">국가: {{countries}}</p>
          <p class="mb-1">출연: {{actors}}</p>
          <p class="mb-1">감독: {{directors}}</p>
          <p>평점: {{imdb_percent}} (IMDB)<span class="mx-2">||</span> {{tmdb_percent}} (TMDB)</p>
        </div>
        <div class="card-body overview">
          <h6 class="ml-1 mb-1">줄거리</h6>
          <p><small>{{overview_visible}}{{#if has_read_more}}<span class="overview-toggle">...<button class="btn btn-sm mt-1 btn-outline-light read-more">더 보기</button></span>{{/if}}<span class="overview-toggle d-none">{{overview_hidden}}</span></small></p>
        </div>
        {{#if similar_container_id}}
        <div class="card-body text-center mx-0 px-0">
          <button class="btn btn-outline-warning show-similar-items mb-2" type="button" data-toggle="collapse" data-target="#{{similar_container_id}}">비슷한 영화 보기</button>
          <div id="{{similar_container_id}}" class="container-sim row collapse mx-0 px-0"></div>
        </div>
        {{/if}}
        <div class="card-footer mt-0 pt-0 bg-dark border-dark">
          <button type="button" class="close" data-dismiss="modal" aria-label="Close">
            <span class="text-light my-0 h1" aria-hidden="true">&times;</span>
          </button>
        </div>
      </div>
    </div>
  </div>
</div>"##;

const RATING_PANEL_TEMPLATE: &str = r##"<span id="{{count_id}}">{{count}}</span>
<div id="{{note_id}}" class="{{#unless ready}}d-none {{/unless}}ready-note"></div>"##;

/// Values available to the card templates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardView {
    pub card_id: String,
    pub movie_id: u64,
    pub title_kr: String,
    pub release_year: String,
    pub poster: String,
    pub rating_id: String,
    /// Pending image marker; cleared on the first intersection
    pub lazy: bool,
    /// Filled from the document's widget at render time
    pub stars: Option<StarView>,
}

/// Star widget settings written into the card's rating slot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StarView {
    pub score: f32,
    pub hover_color: &'static str,
    pub rated_color: &'static str,
}

impl From<&StarWidget> for StarView {
    fn from(widget: &StarWidget) -> Self {
        Self {
            score: widget.score,
            hover_color: widget.palette.hover_color(),
            rated_color: widget.palette.rated_color(),
        }
    }
}

/// Values available to the carousel template
#[derive(Debug, Clone, Serialize)]
pub struct CarouselView {
    pub index: usize,
    pub label: String,
    pub count: usize,
    pub inner_id: String,
}

/// Values available to the detail modal template
#[derive(Debug, Clone, Serialize)]
pub struct DetailView {
    pub modal_id: String,
    pub card_id: String,
    pub poster: String,
    pub title: String,
    pub title_kr: String,
    pub release_year: String,
    pub genres: String,
    pub runtime: String,
    pub countries: String,
    pub actors: String,
    pub directors: String,
    pub imdb_percent: String,
    pub tmdb_percent: String,
    pub overview_visible: String,
    pub overview_hidden: String,
    pub has_read_more: bool,
    pub similar_container_id: Option<String>,
}

#[derive(Serialize)]
struct RatingPanelView<'a> {
    count_id: &'a str,
    note_id: &'a str,
    count: Option<u32>,
    ready: bool,
}

impl<'a> From<&'a RatingPanel> for RatingPanelView<'a> {
    fn from(panel: &'a RatingPanel) -> Self {
        Self {
            count_id: panel.count_selector.trim_start_matches('#'),
            note_id: panel.note_selector.trim_start_matches('#'),
            count: panel.count,
            ready: panel.ready_note_visible,
        }
    }
}

/// Compiled page templates
pub struct CardTemplates {
    hbs: Handlebars<'static>,
}

impl CardTemplates {
    /// Compile the embedded templates
    pub fn new() -> Result<Self, TemplateError> {
        let mut hbs = Handlebars::new();
        hbs.register_template_string(STAR_CARD, STAR_CARD_TEMPLATE)?;
        hbs.register_template_string(POSTER_CARD, POSTER_CARD_TEMPLATE)?;
        hbs.register_template_string(SIMPLE_CARD, SIMPLE_CARD_TEMPLATE)?;
        hbs.register_template_string(CAROUSEL, CAROUSEL_TEMPLATE)?;
        hbs.register_template_string(DETAIL, DETAIL_TEMPLATE)?;
        hbs.register_template_string(RATING_PANEL, RATING_PANEL_TEMPLATE)?;
        Ok(Self { hbs })
    }

    pub fn render_carousel(&self, view: &CarouselView) -> Result<String, RenderError> {
        self.hbs.render(CAROUSEL, view)
    }

    pub fn render_detail(&self, view: &DetailView) -> Result<String, RenderError> {
        self.hbs.render(DETAIL, view)
    }

    /// Render one unit with the document's current state
    pub fn render_unit(&self, document: &Document, unit: &Unit) -> Result<String, RenderError> {
        match &unit.content {
            UnitContent::Markup(html) => Ok(html.clone()),
            UnitContent::Card { template, view } => {
                let mut view = view.clone();
                view.stars = unit
                    .movie_id
                    .and_then(|id| document.widget(id))
                    .map(StarView::from);
                self.hbs.render(template, &view)
            }
        }
    }

    /// Serialize the page: every container in selector order, the rating
    /// panel when the page rates movies, then the shown modals
    pub fn render_page(&self, document: &Document) -> Result<String, RenderError> {
        let mut html = String::new();
        for container in document.containers() {
            html.push_str(&format!("<!-- {} -->\n", container.selector));
            for unit in &container.units {
                html.push_str(self.render_unit(document, unit)?.trim());
                html.push('\n');
            }
        }

        let panel = document.rating_panel();
        if document.has_widgets() || panel.count.is_some() {
            html.push_str(&self.hbs.render(RATING_PANEL, &RatingPanelView::from(panel))?);
            html.push('\n');
        }

        for modal in document.modals().filter(|modal| modal.shown) {
            html.push_str(modal.html.trim());
            html.push('\n');
        }
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(similar_container_id: Option<&str>) -> DetailView {
        DetailView {
            modal_id: "modal-1".to_string(),
            card_id: "movie-card-detail-1".to_string(),
            poster: String::new(),
            title: "Heat".to_string(),
            title_kr: "히트".to_string(),
            release_year: "1995".to_string(),
            genres: "Crime".to_string(),
            runtime: "170".to_string(),
            countries: "US".to_string(),
            actors: String::new(),
            directors: String::new(),
            imdb_percent: "83%".to_string(),
            tmdb_percent: "79%".to_string(),
            overview_visible: "A heist.".to_string(),
            overview_hidden: String::new(),
            has_read_more: false,
            similar_container_id: similar_container_id.map(str::to_string),
        }
    }

    #[test]
    fn test_detail_links_similar_collapse_target() {
        let templates = CardTemplates::new().unwrap();

        let html = templates.render_detail(&detail(Some("container-sim-1"))).unwrap();
        assert!(html.contains(r##"data-target="#container-sim-1""##));
        assert!(html.contains(r#"id="container-sim-1""#));
        assert!(html.contains("상영시간: 170분"));

        let html = templates.render_detail(&detail(None)).unwrap();
        assert!(!html.contains("show-similar-items"));
    }

    #[test]
    fn test_carousel_count_label() {
        let templates = CardTemplates::new().unwrap();
        let html = templates
            .render_carousel(&CarouselView {
                index: 2,
                label: "Drama / 2000s".to_string(),
                count: 12,
                inner_id: "container-ac-2".to_string(),
            })
            .unwrap();
        assert!(html.contains("(12개)"));
        assert!(html.contains("Drama / 2000s"));
    }
}
