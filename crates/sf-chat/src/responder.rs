//! Canned character replies.
//!
//! Replies are drawn uniformly from a fixed set of templates. Two of them
//! weave in the character's personality or description; the user's text
//! is never inspected.

use rand::Rng;
use rand::rngs::StdRng;

use sf_core::Character;

use crate::config::ChatConfig;

/// Number of reply templates.
pub const TEMPLATE_COUNT: usize = 7;

/// Something that can answer a user message in a character's voice.
pub trait Responder {
    /// Produce the character's reply to `message`.
    fn respond(&mut self, message: &str, character: &Character) -> String;
}

/// Render reply template `index` for a character.
///
/// Returns `None` for an index outside `0..TEMPLATE_COUNT`.
pub fn render_template(index: usize, character: &Character) -> Option<String> {
    let text = match index {
        0 => "Interesting! Tell me more about that.".to_string(),
        1 => format!(
            "I am {}. What do you think about that?",
            character.personality
        ),
        2 => format!("I understand you. {}", character.description),
        3 => "That reminds me of the time when...".to_string(),
        4 => "Hmm, let's think about this together.".to_string(),
        5 => "What if we try it another way?".to_string(),
        6 => "I like your approach to this!".to_string(),
        _ => return None,
    };
    Some(text)
}

/// Picks one of the [`TEMPLATE_COUNT`] templates at random.
#[derive(Debug, Clone)]
pub struct CannedResponder {
    rng: StdRng,
}

impl CannedResponder {
    /// Create a responder drawing from the given RNG.
    pub fn new(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Create a responder seeded according to the config.
    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.rng())
    }

    /// Draw a template index.
    pub fn pick_index(&mut self) -> usize {
        self.rng.random_range(0..TEMPLATE_COUNT)
    }
}

impl Responder for CannedResponder {
    fn respond(&mut self, _message: &str, character: &Character) -> String {
        let index = self.pick_index();
        render_template(index, character).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn lyra() -> Character {
        Character::new("Lyra", "A wandering bard.", "cheerful")
    }

    #[test]
    fn templates_interpolate_character() {
        let c = lyra();
        assert_eq!(
            render_template(1, &c).unwrap(),
            "I am cheerful. What do you think about that?"
        );
        assert_eq!(
            render_template(2, &c).unwrap(),
            "I understand you. A wandering bard."
        );
    }

    #[test]
    fn out_of_range_template() {
        assert!(render_template(TEMPLATE_COUNT, &lyra()).is_none());
    }

    #[test]
    fn reply_is_always_a_template() {
        let c = lyra();
        let all: Vec<String> = (0..TEMPLATE_COUNT)
            .map(|i| render_template(i, &c).unwrap())
            .collect();
        let mut r = CannedResponder::new(StdRng::seed_from_u64(1));
        for _ in 0..100 {
            let reply = r.respond("anything at all", &c);
            assert!(all.contains(&reply), "unexpected reply: {reply}");
        }
    }

    #[test]
    fn message_text_is_ignored() {
        let c = lyra();
        let mut a = CannedResponder::new(StdRng::seed_from_u64(5));
        let mut b = CannedResponder::new(StdRng::seed_from_u64(5));
        for _ in 0..20 {
            assert_eq!(a.respond("hello", &c), b.respond("a different text", &c));
        }
    }

    #[test]
    fn distribution_is_roughly_uniform() {
        let mut r = CannedResponder::new(StdRng::seed_from_u64(42));
        let mut counts = [0u32; TEMPLATE_COUNT];
        let trials = 7000;
        for _ in 0..trials {
            counts[r.pick_index()] += 1;
        }
        // Expected 1000 each; allow generous slack.
        for (i, &n) in counts.iter().enumerate() {
            assert!(
                (700..=1300).contains(&n),
                "template {i} drawn {n}/{trials} times"
            );
        }
    }
}
