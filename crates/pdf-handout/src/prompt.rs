//! Instructions for producing a markdown index of a composed handout

use crate::layout::{LayoutPlan, locate};

/// Build the request text a user gives to an assistant (or a colleague) to
/// obtain a markdown index whose entries point at locator labels.
///
/// Returns `None` for an empty plan.
pub fn index_prompt(plan: &LayoutPlan) -> Option<String> {
    if plan.is_empty() {
        return None;
    }

    let per_page = plan.items_per_page;
    let example = plan.item_count.clamp(1, 14);
    let example_label = locate(example, per_page)?;

    Some(format!(
        "\
I have a presentation with {total} slides.
It has been laid out as a PDF handout with {per_page} slides per page, {pages} pages in total.

Each slide carries a locator label of the form \"page-position\":
- Positions start at 1 in the top-left corner of each page and run left to right, then top to bottom.
- For slide number N (counting from 1), the label is (floor((N - 1) / {per_page}) + 1)-(((N - 1) mod {per_page}) + 1).
- For example, slide {example} has the label {example_label}.

From the slide contents I will provide, produce a detailed, tree-structured index of the key topics.
Use Markdown headings (#, ##, ###) for the hierarchy and \"- \" bullet lines for individual points.
End every bullet with the locator label of the slide that covers it.
Be specific: list the individual points under each heading, not only the section titles.",
        total = plan.item_count,
        per_page = per_page,
        pages = plan.pages_needed,
        example = example,
        example_label = example_label,
    ))
}
