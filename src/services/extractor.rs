use scraper::{ElementRef, Html, Selector};

use crate::domain::section::{section_href, SectionRecord};

const SECTION_HEADINGS: [&str; 2] = ["h2", "h3"];

fn is_section_heading(element: &ElementRef) -> bool {
    SECTION_HEADINGS.contains(&element.value().name())
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Pulls one `SectionRecord` per `h2`/`h3` that carries an `id`.
///
/// A section's content is the text of the `p` elements and of the `li`
/// elements inside `ul` elements that follow the heading as siblings, up to
/// the next `h2`/`h3`. Content wrapped in other containers is not descended
/// into.
pub fn extract_sections(markup: &str, base_url: &str) -> Vec<SectionRecord> {
    let document = Html::parse_document(markup);
    let heading_selector = Selector::parse("h2, h3").expect("static selector");
    let list_item_selector = Selector::parse("li").expect("static selector");

    let headings: Vec<ElementRef> = document.select(&heading_selector).collect();
    log::info!("Found {} headings in the page.", headings.len());

    let sections: Vec<SectionRecord> = headings
        .into_iter()
        .filter_map(|heading| {
            let anchor_id = heading.value().id().filter(|id| !id.is_empty())?;

            let mut content: Vec<String> = vec![];
            for sibling in heading.next_siblings().filter_map(ElementRef::wrap) {
                if is_section_heading(&sibling) {
                    break;
                }
                match sibling.value().name() {
                    "p" => content.push(element_text(&sibling)),
                    "ul" => content.extend(
                        sibling
                            .select(&list_item_selector)
                            .map(|item| element_text(&item)),
                    ),
                    _ => {}
                }
            }

            Some(SectionRecord {
                title: element_text(&heading),
                content: content.join(" "),
                href: section_href(base_url, anchor_id),
            })
        })
        .collect();

    log::info!("Extracted {} sections from the page.", sections.len());
    sections
}
