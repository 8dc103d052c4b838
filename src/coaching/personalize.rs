use once_cell::sync::Lazy;
use regex::Regex;

use crate::profile::{UserProfile, VoiceTone};

// Recognized leading words of the fixed tip lists; a user's name is spliced
// in front of whichever one opens the message.
static LEADING_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(Take|Try|Consider|Remember|Focus|Pause|Good morning|Evening reflection|Great job",
        r"|Learning something new|You're in work mode|Social interactions|Movement is medicine",
        r"|Curiosity is a superpower|Remember that learning|Start your day|Morning check-in",
        r"|Midday check-in|Afternoon energy dip|Evening check-in|It's getting late",
        r"|Late night thoughts)",
    ))
    .unwrap()
});

static TRAILING_PERIOD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.$").unwrap());
static TRAILING_BANG: Lazy<Regex> = Lazy::new(|| Regex::new(r"!$").unwrap());

/// Personalize a coaching message for the user: prefix their name onto a
/// recognized opening word and adjust trailing punctuation to their tone.
pub fn personalize(message: &str, profile: &UserProfile) -> String {
    let mut message = message.to_string();

    if let Some(name) = &profile.name {
        message = LEADING_WORD
            .replace(&message, format!("{name}, $1"))
            .into_owned();
    }

    match profile.voice_tone {
        VoiceTone::Cheerful => message = TRAILING_PERIOD.replace(&message, " 😊").into_owned(),
        VoiceTone::Calm => message = TRAILING_BANG.replace(&message, ".").into_owned(),
        VoiceTone::Direct => {}
    }

    message
}
