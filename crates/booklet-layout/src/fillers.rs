//! Text pages used to pad a booklet out to whole sheets

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A titled, numbered list printed on an otherwise empty page
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FillerContent {
    pub title: String,
    pub items: Vec<String>,
}

impl FillerContent {
    pub fn new(title: impl Into<String>, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    /// Items as styled paragraphs with a bold running number
    pub fn numbered_items(&self) -> impl Iterator<Item = String> + '_ {
        self.items
            .iter()
            .enumerate()
            .map(|(i, item)| format!("<b>{}.</b> {}", i + 1, item.trim()))
    }
}

/// The fillers shipped with the tool, tried in this order
pub fn builtin_fillers() -> Vec<FillerContent> {
    vec![
        FillerContent::new(
            "Suggestions for Newcomers",
            [
                "Keep coming back, even on the days it feels hard.",
                "Arrive a few minutes early and stay a few minutes after.",
                "Sit near the front and listen for the similarities.",
                "Collect phone numbers and use them before you need them.",
                "Try a different meeting each week until you find a home group.",
                "Ask someone with more time to walk through the literature with you.",
                "Read something about recovery every day.",
                "Share honestly when you are ready; listening counts too.",
                "Avoid the people, places and things that put you at risk.",
                "Take it one day at a time, or one hour at a time.",
                "Help set up chairs or make coffee; service builds belonging.",
                "Remember that nobody has to do this alone.",
            ],
        ),
        FillerContent::new(
            "Tips for Meeting Leaders",
            [
                "Open the room on time and have the readings ready.",
                "Welcome newcomers and visitors by name if they offer one.",
                "Keep the meeting format posted where everyone can see it.",
                "Invite quieter members to share without putting them on the spot.",
                "Gently keep shares to the agreed time limit.",
                "Protect the anonymity of everyone in the room.",
                "Announce upcoming events and service opportunities briefly.",
                "Pass the basket and report the group's needs plainly.",
                "Leave a few minutes for newcomers at the end.",
                "Tidy the room and leave it better than you found it.",
                "Bring questions to the group conscience rather than deciding alone.",
                "Hand the role on when your commitment ends.",
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_fillers_have_twelve_items() {
        let fillers = builtin_fillers();
        assert_eq!(fillers.len(), 2);
        assert!(fillers.iter().all(|f| f.items.len() == 12));
    }

    #[test]
    fn test_numbered_items_markup() {
        let filler = FillerContent::new("T", ["  first ", "second"]);
        let items: Vec<_> = filler.numbered_items().collect();
        assert_eq!(items, vec!["<b>1.</b> first", "<b>2.</b> second"]);
    }
}
