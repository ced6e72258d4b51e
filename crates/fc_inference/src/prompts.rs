//! Prompt templates for the two pipeline stages.
//!
//! Placeholders are `{name}` and are substituted in a single pass, so text
//! pulled from an article can never be mistaken for a placeholder.

pub const SUMMARY_TEMPLATE: &str = "You are a communications expert. Given this news article, summarize it in {sentences} very clear sentences and be accurate. Do not make things up. Do not include line numbers. Check to make sure you are correct. Think step by step.

Fallacies to check:
{fallacies}

Article: {content}

Communications expert summary:";

pub const ANALYSIS_TEMPLATE: &str = "You are an ethics professor analyzing this article summary. Review it using the fallacy definitions below. Be succinct and easy to read, but draw intelligently upon all ethics rules. Provide:
1. The {max_fallacies} most impactful fallacies found in the summary.
2. Why each fallacy might mislead readers.
3. One possible alternative interpretation of why each fallacy could have been included, as a counterfactual and counterpoint to finding that fallacy.

Do not include line numbers. Discuss each fallacy in its own paragraph. If you find fewer relevant fallacies, discuss only the ones you found.
If you cannot find any, leave the answer blank.

Article Summary: {summary}
Fallacies to consider:
{fallacies}

Professor:";

/// Substitutes `{key}` placeholders. Unknown placeholders are left as is.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + vars.iter().map(|(_, v)| v.len()).sum::<usize>());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let replaced = after.find('}').and_then(|end| {
            let key = &after[..end];
            vars.iter()
                .find(|(k, _)| *k == key)
                .map(|(_, v)| (*v, end))
        });
        match replaced {
            Some((value, end)) => {
                out.push_str(value);
                rest = &after[end + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn summary_prompt(content: &str, fallacies: &str, sentences: usize) -> String {
    let sentences = sentences.to_string();
    render(
        SUMMARY_TEMPLATE,
        &[
            ("sentences", sentences.as_str()),
            ("fallacies", fallacies),
            ("content", content),
        ],
    )
}

pub fn analysis_prompt(summary: &str, fallacies: &str, max_fallacies: usize) -> String {
    let max_fallacies = max_fallacies.to_string();
    render(
        ANALYSIS_TEMPLATE,
        &[
            ("max_fallacies", max_fallacies.as_str()),
            ("summary", summary),
            ("fallacies", fallacies),
        ],
    )
}
