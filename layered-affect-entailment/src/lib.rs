#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Zero-shot emotion scoring over an injected entailment model.
//!
//! Each category name is rendered into a [`HypothesisTemplate`] and the
//! model is asked how strongly the text entails it. The model itself is a
//! capability handed in by the caller through the [`Entailment`] trait; this
//! crate never loads weights or talks to a network.
//!
//! [`Retry`] and [`ConcurrencyLimit`] wrap a capability before injection.

mod capability;
mod scorer;
mod template;

pub use capability::{ConcurrencyLimit, Entailment, EntailmentFailure, Retry};
pub use scorer::EntailmentScorer;
pub use template::HypothesisTemplate;
