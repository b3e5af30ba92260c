use std::ops::Range;

use log::{debug, warn};

use crate::config::TocConfig;
use crate::html::attributes::Attributes;
use crate::html::document::{ContainerElement, Document, HeadingElement};
use crate::toc::{build, HeadingAugmentation, TocPlan};

/// Attribute on the wrapper span carrying the click-to-navigate target
pub const NAVIGATE_ATTRIBUTE: &str = "data-toc-navigate";

/// Why a page was left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No element matches the container selector
    NoContainer,
    /// No eligible heading, or fewer than `minimumHeaders`
    NotEnoughHeadings,
    /// The headings already carry the marker class of an earlier run
    AlreadyProcessed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    Rendered { headings: usize, containers: usize },
    Skipped(SkipReason),
}

/// A page after a TOC run
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub html: String,
    pub status: RenderStatus,
    pub plan: Option<TocPlan>,
}

impl RenderOutcome {
    fn skipped(source: &str, reason: SkipReason) -> Self {
        Self {
            html: source.to_string(),
            status: RenderStatus::Skipped(reason),
            plan: None,
        }
    }

    pub fn is_rendered(&self) -> bool {
        matches!(self.status, RenderStatus::Rendered { .. })
    }
}

/// Run the table of contents over a rendered page.
///
/// Either every output container gets the outline and every eligible heading
/// is augmented, or the page comes back byte for byte unchanged.
pub fn render(source: &str, config: &TocConfig) -> RenderOutcome {
    let document = Document::parse(source);

    let containers = document.containers(&config.container);
    if containers.is_empty() {
        debug!("No element matches {}, leaving page unchanged", config.container);
        return RenderOutcome::skipped(source, SkipReason::NoContainer);
    }

    let plan = match build(&document.heading_nodes(), config) {
        Some(plan) => plan,
        None => return RenderOutcome::skipped(source, SkipReason::NotEnoughHeadings),
    };

    if is_processed(&document, &plan, config) {
        debug!("Headings already carry a table of contents, leaving page unchanged");
        return RenderOutcome::skipped(source, SkipReason::AlreadyProcessed);
    }

    let (html, headings) = apply_plan(&document, &containers, &plan);
    RenderOutcome {
        html,
        status: RenderStatus::Rendered {
            headings,
            containers: containers.len(),
        },
        plan: Some(plan),
    }
}

/// Whether an eligible heading already went through a run with the same class prefix
fn is_processed(document: &Document<'_>, plan: &TocPlan, config: &TocConfig) -> bool {
    let marker = config.class_name("top-level-header");
    plan.augmentations.iter().any(|augmentation| {
        document
            .headings()
            .get(augmentation.index)
            .is_some_and(|heading| heading.attributes.has_class(&marker))
    })
}

/// Write `plan` into the page; returns the new markup and the number of
/// headings rewritten
fn apply_plan(
    document: &Document<'_>,
    containers: &[ContainerElement],
    plan: &TocPlan,
) -> (String, usize) {
    let mut edits: Vec<(Range<usize>, String)> = containers
        .iter()
        .map(|container| (container.content.clone(), plan.markup.clone()))
        .collect();

    for augmentation in &plan.augmentations {
        let heading = match document.headings().get(augmentation.index) {
            Some(heading) => heading,
            None => continue,
        };
        if containers
            .iter()
            .any(|container| overlaps(&container.span, &heading.span))
        {
            warn!(
                "Heading #{} sits inside the TOC container and is not augmented",
                augmentation.identifier
            );
            continue;
        }
        edits.push((
            heading.span.clone(),
            rewrite_heading(document, heading, augmentation),
        ));
    }

    let headings = edits.len() - containers.len();
    (splice(document.source(), edits), headings)
}

fn rewrite_heading(
    document: &Document<'_>,
    heading: &HeadingElement,
    augmentation: &HeadingAugmentation,
) -> String {
    let mut attributes = heading.attributes.clone();
    if augmentation.assign_identifier {
        attributes.set("id", &augmentation.identifier);
    }
    for class in &augmentation.classes {
        attributes.add_class(class);
    }

    let mut wrapper = Attributes::default();
    wrapper.add_class(&augmentation.wrapper_class);
    if let Some(handler) = &augmentation.click_handler {
        wrapper.set(NAVIGATE_ATTRIBUTE, &format!("#{}", handler.fragment));
    }

    format!(
        "<{tag}{attributes}><span{wrapper}>{content}</span>{controls}</{tag}>",
        tag = heading.tag,
        attributes = attributes.to_html(),
        wrapper = wrapper.to_html(),
        content = document.heading_content(heading),
        controls = augmentation.controls_html(),
    )
}

fn overlaps(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.start < b.end && b.start < a.end
}

/// Apply non-overlapping replacements; an edit overlapping an earlier one is dropped
fn splice(source: &str, mut edits: Vec<(Range<usize>, String)>) -> String {
    edits.sort_by_key(|(range, _)| range.start);

    let mut html = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, replacement) in edits {
        if range.start < cursor {
            continue;
        }
        html.push_str(&source[cursor..range.start]);
        html.push_str(&replacement);
        cursor = range.end;
    }
    html.push_str(&source[cursor..]);
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BackToTopDisplay, ContainerSelector, ListType};

    const PAGE: &str = r#"<div class="toc"></div>
<h2 id="a">Alpha</h2>
<a name="b.1"></a><h3>Beta</h3>
<h2 id="c">Gamma</h2>"#;

    fn config(minimum: usize) -> TocConfig {
        TocConfig {
            minimum_headers: minimum,
            ..TocConfig::default()
        }
    }

    #[test]
    fn test_defaults_render() {
        let outcome = render(PAGE, &config(3));
        assert_eq!(
            outcome.status,
            RenderStatus::Rendered {
                headings: 3,
                containers: 1
            }
        );

        let expected = "<div class=\"toc\">\
<ol class=\"jekyll-toc\"><li><a href=\"#a\">Alpha</a><ol><li><a href=\"#b-1\">Beta</a></li></ol></li>\
<li><a href=\"#c\">Gamma</a></li></ol></div>
<h2 id=\"a\" class=\"jekyll-toc-top-level-header jekyll-toc-header\">\
<span class=\"jekyll-toc-wrapper\" data-toc-navigate=\"#a\">Alpha</span></h2>
<a name=\"b.1\"></a><h3 id=\"b-1\" class=\"jekyll-toc-top-level-header jekyll-toc-header\">\
<span class=\"jekyll-toc-wrapper\" data-toc-navigate=\"#b-1\">Beta</span></h3>
<h2 id=\"c\" class=\"jekyll-toc-top-level-header jekyll-toc-header\">\
<span class=\"jekyll-toc-wrapper\" data-toc-navigate=\"#c\">Gamma</span></h2>";
        assert_eq!(outcome.html, expected);
    }

    #[test]
    fn test_too_few_headings_leaves_page_untouched() {
        let outcome = render(PAGE, &config(4));
        assert_eq!(outcome.status, RenderStatus::Skipped(SkipReason::NotEnoughHeadings));
        assert_eq!(outcome.html, PAGE);
        assert!(outcome.plan.is_none());
        // the sibling-derived id was not assigned either
        assert!(!outcome.html.contains("id=\"b-1\""));
    }

    #[test]
    fn test_missing_container_leaves_page_untouched() {
        let toc = TocConfig {
            container: ContainerSelector::Id("nowhere".to_string()),
            ..config(1)
        };
        let outcome = render(PAGE, &toc);
        assert_eq!(outcome.status, RenderStatus::Skipped(SkipReason::NoContainer));
        assert_eq!(outcome.html, PAGE);
    }

    #[test]
    fn test_site_defaults_controls() {
        let outcome = render(PAGE, &TocConfig::site_defaults());
        assert!(outcome.is_rendered());

        let link_here = "<a href=\"#a\" title=\"Link here\" class=\"jekyll-toc-anchor jekyll-toc-link-here\">\
                         <span class=\"jekyll-toc-icon icon icon-link\"></span></a>";
        let back_to_top = "<a href=\"#toc\" title=\"Back to Table of Contents\" \
                           class=\"jekyll-toc-anchor jekyll-toc-back-to-top\">\
                           <span class=\"jekyll-toc-icon icon icon-chevron-up\"></span></a>";
        assert!(outcome
            .html
            .contains(&format!("Alpha</span>{}{}</h2>", link_here, back_to_top)));
        assert_eq!(outcome.html.matches("jekyll-toc-back-to-top").count(), 3);
    }

    #[test]
    fn test_back_to_top_on_highest_headings_only() {
        let toc = TocConfig {
            back_to_top: true,
            back_to_top_id: "toc".to_string(),
            back_to_top_display: BackToTopDisplay::Highest,
            ..config(1)
        };
        let outcome = render(PAGE, &toc);
        assert_eq!(outcome.html.matches("jekyll-toc-back-to-top").count(), 2);
        assert!(outcome.html.contains("Beta</span></h3>"));
    }

    #[test]
    fn test_unordered_list_with_title_into_every_container() {
        let page = format!("<nav class=\"toc\">old</nav>{}<aside class=\"toc\"></aside>", PAGE);
        let toc = TocConfig {
            title: "<strong>Contents</strong>".to_string(),
            list_type: ListType::Ul,
            link_header: false,
            ..config(1)
        };
        let outcome = render(&page, &toc);

        assert_eq!(
            outcome.status,
            RenderStatus::Rendered {
                headings: 3,
                containers: 3
            }
        );
        assert_eq!(
            outcome
                .html
                .matches("<strong>Contents</strong> <ul class=\"jekyll-toc\">")
                .count(),
            3
        );
        assert!(!outcome.html.contains("old"));
        assert!(!outcome.html.contains(NAVIGATE_ATTRIBUTE));
        assert!(outcome.html.contains("<h2 id=\"a\" class=\"jekyll-toc-top-level-header\">"));
    }

    #[test]
    fn test_existing_markup_is_preserved() {
        let page = r#"<div class="toc"></div><h2 id="it&#39;s" class='lead'>It&#39;s <code>x</code></h2><h2 id="b">B</h2>"#;
        let outcome = render(page, &config(2));

        assert!(outcome.html.contains(
            "<h2 id=\"it&#39;s\" class='lead jekyll-toc-top-level-header jekyll-toc-header'>\
             <span class=\"jekyll-toc-wrapper\" data-toc-navigate=\"#it%27s\">It&#39;s <code>x</code></span></h2>"
        ));
        assert!(outcome.html.contains("<a href=\"#it%27s\">It&#39;s <code>x</code></a>"));
    }

    #[test]
    fn test_heading_inside_container_is_not_rewritten() {
        let page = r#"<div class="toc"><h2 id="x">Old</h2></div><h2 id="a">A</h2><h2 id="b">B</h2>"#;
        let outcome = render(page, &config(3));

        assert_eq!(
            outcome.status,
            RenderStatus::Rendered {
                headings: 2,
                containers: 1
            }
        );
        assert!(outcome.html.starts_with("<div class=\"toc\"><ol class=\"jekyll-toc\"><li><a href=\"#x\">Old</a></li>"));
    }

    #[test]
    fn test_second_run_leaves_page_unchanged() {
        let toc = TocConfig::site_defaults();
        let once = render(PAGE, &toc);
        assert!(once.is_rendered());

        let twice = render(&once.html, &toc);
        assert_eq!(twice.status, RenderStatus::Skipped(SkipReason::AlreadyProcessed));
        assert_eq!(twice.html, once.html);
        assert_eq!(twice.html.matches("jekyll-toc-wrapper").count(), 3);
    }

    #[test]
    fn test_other_class_prefix_is_not_a_previous_run() {
        let once = render(PAGE, &config(3)).html;
        let toc = TocConfig {
            class_prefix: "docs".to_string(),
            ..config(3)
        };
        assert!(render(&once, &toc).is_rendered());
    }

    #[test]
    fn test_commented_out_headings_do_not_count() {
        let page = r#"<div class="toc"></div><!-- <h2 id="old">Old</h2> --><h2 id="a">A</h2><h2 id="b">B</h2>"#;

        let outcome = render(page, &config(2));
        assert!(outcome.is_rendered());
        assert!(!outcome.html.contains("#old"));
        assert!(outcome.html.contains("<!-- <h2 id=\"old\">Old</h2> -->"));

        let outcome = render(page, &config(3));
        assert_eq!(outcome.status, RenderStatus::Skipped(SkipReason::NotEnoughHeadings));
        assert_eq!(outcome.html, page);
    }

    #[test]
    fn test_splice_drops_overlaps() {
        let edits = vec![(2..4, "X".to_string()), (0..3, "Y".to_string())];
        assert_eq!(splice("abcdef", edits), "Ydef");
    }
}
