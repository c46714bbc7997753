//! Composition of the final HTML document.

use crate::seo::markup::find_close_tag;
use crate::seo::redirect::RedirectDirective;
use crate::seo::stripper::DefaultTagStripper;

/// Inserts fetched metadata (and an optional redirect script) into a bundle document.
#[derive(Debug, Clone, Default)]
pub struct HeadInjector {
    stripper: DefaultTagStripper,
}

impl HeadInjector {
    pub fn new(stripper: DefaultTagStripper) -> Self {
        Self { stripper }
    }

    /// Strip the bundle's default tags, then place `fragment` and the redirect
    /// script right before the first closing head tag.
    ///
    /// Without a closing head tag the stripped document comes back as is.
    pub fn inject(
        &self,
        bundle: &str,
        fragment: &str,
        redirect: Option<&RedirectDirective>,
    ) -> String {
        let stripped = self.stripper.strip(bundle);

        let Some((head_close, _)) = find_close_tag(&stripped, "head", 0) else {
            tracing::warn!(
                bundle_len = bundle.len(),
                "Bundle document has no closing head tag; metadata not injected"
            );
            return stripped;
        };

        let script = redirect.map(RedirectDirective::script).unwrap_or_default();
        let mut out = String::with_capacity(stripped.len() + fragment.len() + script.len() + 3);
        out.push_str(&stripped[..head_close]);
        out.push('\n');
        out.push_str(fragment);
        out.push('\n');
        out.push_str(&script);
        out.push('\n');
        out.push_str(&stripped[head_close..]);
        out
    }
}
