//! Intent classification for game-creation conversations.
//!
//! Deterministic pattern matching over the lower-cased, trimmed message.
//! `classify_intent` is total: every (message, state) pair yields exactly one
//! [`Intent`].

use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

use crate::conversation::text::{any_match, compile_all, word_count, DESCRIPTION_MIN_WORDS};
use crate::conversation::ConversationState;
use crate::error::DomainError;

/// What a single user turn is trying to accomplish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    SelectGenre,
    SetTheme,
    DescribeGame,
    AddDetail,
    Ready,
    ConfirmYes,
    ConfirmNo,
    GenerateNow,
    StartOver,
    GeneralChat,
}

impl Intent {
    pub fn all() -> &'static [Intent] {
        &[
            Intent::SelectGenre,
            Intent::SetTheme,
            Intent::DescribeGame,
            Intent::AddDetail,
            Intent::Ready,
            Intent::ConfirmYes,
            Intent::ConfirmNo,
            Intent::GenerateNow,
            Intent::StartOver,
            Intent::GeneralChat,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::SelectGenre => "select_genre",
            Intent::SetTheme => "set_theme",
            Intent::DescribeGame => "describe_game",
            Intent::AddDetail => "add_detail",
            Intent::Ready => "ready",
            Intent::ConfirmYes => "confirm_yes",
            Intent::ConfirmNo => "confirm_no",
            Intent::GenerateNow => "generate_now",
            Intent::StartOver => "start_over",
            Intent::GeneralChat => "general_chat",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Intent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Intent::all()
            .iter()
            .copied()
            .find(|intent| intent.as_str() == wanted)
            .ok_or_else(|| DomainError::parse(format!("Unknown intent: {}", s)))
    }
}

static START_OVER: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bstart\s*over\b",
        r"\breset\b",
        r"\bnew\s*game\b",
        r"\bfrom\s*scratch\b",
        r"\bclear\b",
    ])
});

static YES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\byes\b",
        r"\byeah\b",
        r"\byep\b",
        r"\bsure\b",
        r"\bok(?:ay)?\b",
        r"\bgo\s*ahead\b",
        r"\bdo\s*it\b",
        r"\blet'?s\s*go\b",
        r"\bperfect\b",
        r"\bgreat\b",
        r"\bawesome\b",
        r"\blooks?\s*good\b",
        r"\bthat'?s?\s*(?:right|correct|good|fine)\b",
        r"\bconfirm\b",
        r"\bgenerate\b",
        r"\bbuild\b",
        r"\bcreate\b",
        r"\bmake\s*it\b",
    ])
});

static NO: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bno\b",
        r"\bnah\b",
        r"\bnope\b",
        r"\bwait\b",
        r"\bchange\b",
        r"\bmodify\b",
        r"\bactually\b",
        r"\bhmm\b",
        r"\bnot\s*(?:quite|right)\b",
        r"\bgo\s*back\b",
        r"\bedit\b",
    ])
});

/// Explicit build commands: skip confirmation.
static GENERATE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bgenerate\b",
        r"\bbuild\s*(?:it|my|the)\b",
        r"\bcreate\s*(?:it|my|the)\b",
        r"\bmake\s*(?:it|my|the)\b",
        r"\bstart\s*generat",
    ])
});

/// "I'm done describing": move on to the confirmation step.
static READY: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bready\b",
        r"\bthat'?s?\s*(?:all|it|everything)\b",
        r"\bdone\b.*\bdescrib",
        r"\bnothing\s*else\b",
    ])
});

static GENRE_HINTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bplatform(?:er|ing)?\b",
        r"\btop[- ]?down\b",
        r"\brpg\b",
        r"\bshoot(?:er|ing|em|'em)\b",
        r"\bspace\b.*\bshoot",
        r"\bpuzzle\b",
        r"\bvisual novel\b",
        r"\bstory\b.*\bgame\b",
        r"\brac(?:e|ing)\b",
        r"\bdriv(?:e|ing)\b",
        r"\badventure\b",
        r"\baction\b",
        r"\bsurvival\b",
        r"\broguelike\b",
        r"\btower\s*defen[sc]e\b",
        r"\bside[- ]?scroll(?:er|ing)?\b",
        r"\bendless\s*runner\b",
    ])
});

static THEME_HINTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    compile_all(&[
        r"\bfantasy\b",
        r"\bsci[- ]?fi\b",
        r"\bspace\b",
        r"\bmodern\b",
        r"\bmedieval\b",
        r"\bpixel\b",
        r"\bretro\b",
        r"\bneon\b",
        r"\bhorror\b",
        r"\bcartoon\b",
        r"\bcute\b",
        r"\bdark\b",
        r"\bnature\b",
        r"\bocean\b",
        r"\bunder\s*water\b",
        r"\bjungle\b",
        r"\bdesert\b",
        r"\bcity\b",
        r"\burban\b",
        r"\bcyber\s*punk\b",
        r"\bsteam\s*punk\b",
        r"\bpost[- ]?apocalyp",
        r"\bwest(?:ern)?\b",
        r"\bninja\b",
        r"\bsamurai\b",
        r"\bpirate\b",
        r"\bzombie\b",
        r"\bknight\b",
        r"\brobot\b",
        r"\balien\b",
        r"\bwizard\b",
    ])
});

/// Classify one user message given the current conversation state.
///
/// Precedence, first rule that fires wins:
/// 1. start-over phrasing, in any state
/// 2. while Confirming: yes / no phrasing
/// 3. while gathering details: a build command gives `GenerateNow`, a
///    done-describing phrase gives `Ready`, unless the message also names a
///    genre or is long enough to be a description
/// 4. long message: `DescribeGame`
/// 5-7. genre and/or theme keywords
/// 8. a few words while gathering: `AddDetail`
/// 9. `GeneralChat`
pub fn classify_intent(message: &str, state: ConversationState) -> Intent {
    let low = message.trim().to_lowercase();

    if any_match(&START_OVER, &low) {
        return Intent::StartOver;
    }

    if state == ConversationState::Confirming {
        if any_match(&YES, &low) {
            return Intent::ConfirmYes;
        }
        if any_match(&NO, &low) {
            return Intent::ConfirmNo;
        }
    }

    let words = word_count(&low);
    let has_genre = any_match(&GENRE_HINTS, &low);
    let has_theme = any_match(&THEME_HINTS, &low);

    // A long message that happens to contain "build" is a description.
    if state.is_gathering() && !has_genre && words < DESCRIPTION_MIN_WORDS {
        if any_match(&GENERATE, &low) {
            return Intent::GenerateNow;
        }
        if any_match(&READY, &low) {
            return Intent::Ready;
        }
    }

    if words >= DESCRIPTION_MIN_WORDS {
        return Intent::DescribeGame;
    }

    match (has_genre, has_theme) {
        (true, true) => Intent::DescribeGame,
        (true, false) => Intent::SelectGenre,
        (false, true) => Intent::SetTheme,
        (false, false) if state.is_gathering() && words >= 3 => Intent::AddDetail,
        (false, false) => Intent::GeneralChat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ConversationState as S;

    #[test]
    fn start_over_wins_in_every_state() {
        for state in S::all() {
            assert_eq!(classify_intent("let's start over", *state), Intent::StartOver);
            assert_eq!(classify_intent("RESET", *state), Intent::StartOver);
        }
    }

    #[test]
    fn confirming_reads_yes_and_no() {
        assert_eq!(classify_intent("yes", S::Confirming), Intent::ConfirmYes);
        assert_eq!(classify_intent("Looks good!", S::Confirming), Intent::ConfirmYes);
        assert_eq!(classify_intent("nah", S::Confirming), Intent::ConfirmNo);
        assert_eq!(
            classify_intent("actually make enemies red", S::Confirming),
            Intent::ConfirmNo
        );
    }

    #[test]
    fn yes_outside_confirming_is_chat() {
        assert_eq!(classify_intent("yes", S::Greeting), Intent::GeneralChat);
    }

    #[test]
    fn ready_phrase_while_gathering() {
        assert_eq!(classify_intent("ready", S::DetailGathering), Intent::Ready);
        assert_eq!(classify_intent("that's all", S::ThemeSelection), Intent::Ready);
        assert_eq!(classify_intent("nothing else", S::DetailGathering), Intent::Ready);
    }

    #[test]
    fn build_command_while_gathering() {
        assert_eq!(classify_intent("generate it", S::DetailGathering), Intent::GenerateNow);
        assert_eq!(classify_intent("build it now", S::ThemeSelection), Intent::GenerateNow);
    }

    #[test]
    fn ready_outside_gathering_is_not_a_command() {
        assert_eq!(classify_intent("ready", S::Greeting), Intent::GeneralChat);
        assert_eq!(classify_intent("build it", S::GenreSelection), Intent::GeneralChat);
    }

    #[test]
    fn build_with_genre_falls_through_to_genre() {
        assert_eq!(
            classify_intent("build me a racing game", S::DetailGathering),
            Intent::SelectGenre
        );
    }

    #[test]
    fn long_message_with_build_is_a_description() {
        let msg = "generate a game where a little robot explores caves full of glowing mushrooms and traps";
        assert!(word_count(msg) >= DESCRIPTION_MIN_WORDS);
        assert_eq!(classify_intent(msg, S::DetailGathering), Intent::DescribeGame);
    }

    #[test]
    fn genre_and_theme_is_a_description() {
        assert_eq!(
            classify_intent("I want a dark fantasy platformer with no enemies", S::Greeting),
            Intent::DescribeGame
        );
    }

    #[test]
    fn single_keyword_intents() {
        assert_eq!(classify_intent("a puzzle game", S::Greeting), Intent::SelectGenre);
        assert_eq!(classify_intent("make it cyberpunk", S::GenreSelection), Intent::SetTheme);
    }

    #[test]
    fn add_detail_needs_three_words_while_gathering() {
        assert_eq!(
            classify_intent("add double jump please", S::DetailGathering),
            Intent::AddDetail
        );
        assert_eq!(classify_intent("double jump", S::DetailGathering), Intent::GeneralChat);
        assert_eq!(
            classify_intent("add double jump please", S::Greeting),
            Intent::GeneralChat
        );
    }

    #[test]
    fn empty_and_odd_input_is_general_chat() {
        for state in [S::Greeting, S::DetailGathering, S::Complete] {
            assert_eq!(classify_intent("", state), Intent::GeneralChat);
            assert_eq!(classify_intent("   \n\t ", state), Intent::GeneralChat);
            assert_eq!(classify_intent("🎮🎮", state), Intent::GeneralChat);
        }
    }

    #[test]
    fn classify_is_total_over_states() {
        let samples = ["", "yes", "no", "ready", "a racing game", "reset", "ÄÖÜ ß ünïcödé"];
        for state in S::all() {
            for msg in samples {
                assert!(Intent::all().contains(&classify_intent(msg, *state)));
            }
        }
    }

    #[test]
    fn intent_parses_from_wire_name() {
        assert_eq!("generate_now".parse::<Intent>().unwrap(), Intent::GenerateNow);
        assert!("dance".parse::<Intent>().is_err());
    }
}
