//! Static coaching rule tables: trigger-phrase nudges, time-of-day tips,
//! and activity-keyword tips. Pure data, scanned with lowercase substring
//! matching.

use crate::session::Priority;

/// A reactive nudge fired by a trigger phrase in a transcript segment.
#[derive(Debug, Clone, Copy)]
pub struct StaticNudge {
    pub trigger: &'static str,
    pub message: &'static str,
    pub category: &'static str,
    pub priority: Priority,
}

/// Trigger-phrase table, scanned in order; the first match wins when only
/// one nudge is surfaced.
pub const STATIC_NUDGES: &[StaticNudge] = &[
    // Focus and productivity
    StaticNudge {
        trigger: "can't focus",
        message: "Take 5 minutes. Breathe deeply, then refocus on one task.",
        category: "focus",
        priority: Priority::High,
    },
    StaticNudge {
        trigger: "distracted",
        message: "Try the 5-4-3-2-1 technique: Name 5 things you see, 4 you can touch, 3 you hear, 2 you smell, 1 you taste.",
        category: "focus",
        priority: Priority::Medium,
    },
    StaticNudge {
        trigger: "procrastinating",
        message: "Start with just 2 minutes. Often that's all it takes to get going.",
        category: "productivity",
        priority: Priority::High,
    },
    // Energy and motivation
    StaticNudge {
        trigger: "tired",
        message: "Try a quick stretch or walk around. Movement can boost your energy!",
        category: "energy",
        priority: Priority::Medium,
    },
    StaticNudge {
        trigger: "exhausted",
        message: "Consider a 10-minute power nap or a short walk outside.",
        category: "energy",
        priority: Priority::High,
    },
    StaticNudge {
        trigger: "unmotivated",
        message: "Break your task into tiny steps. What's the smallest next action?",
        category: "motivation",
        priority: Priority::Medium,
    },
    // Stress and anxiety
    StaticNudge {
        trigger: "stressed",
        message: "Take 3 deep breaths. Inhale for 4, hold for 4, exhale for 6.",
        category: "stress",
        priority: Priority::High,
    },
    StaticNudge {
        trigger: "anxious",
        message: "Ground yourself: Name 5 things you can see, 4 you can touch, 3 you can hear.",
        category: "anxiety",
        priority: Priority::High,
    },
    StaticNudge {
        trigger: "overwhelmed",
        message: "Break this down into smaller steps. What's the next right thing?",
        category: "stress",
        priority: Priority::High,
    },
    // Time management
    StaticNudge {
        trigger: "late",
        message: "It's okay. Focus on what you can control right now.",
        category: "time",
        priority: Priority::Medium,
    },
    StaticNudge {
        trigger: "behind",
        message: "Prioritize: What's most important right now?",
        category: "time",
        priority: Priority::Medium,
    },
    StaticNudge {
        trigger: "deadline",
        message: "Focus on progress, not perfection. What can you complete now?",
        category: "time",
        priority: Priority::High,
    },
    // Self-doubt and confidence
    StaticNudge {
        trigger: "doubt",
        message: "Remember your past successes. You've got this!",
        category: "confidence",
        priority: Priority::Medium,
    },
    StaticNudge {
        trigger: "can't do this",
        message: "You don't have to do it perfectly. Just start.",
        category: "confidence",
        priority: Priority::High,
    },
    StaticNudge {
        trigger: "not good enough",
        message: "You are enough. Your effort matters.",
        category: "confidence",
        priority: Priority::High,
    },
    // Relationships and communication
    StaticNudge {
        trigger: "argument",
        message: "Take a moment to breathe. What's really important here?",
        category: "relationships",
        priority: Priority::High,
    },
    StaticNudge {
        trigger: "misunderstood",
        message: "Try expressing your feelings with 'I feel...' statements.",
        category: "communication",
        priority: Priority::Medium,
    },
    StaticNudge {
        trigger: "conflict",
        message: "Pause and reflect: What's your goal in this situation?",
        category: "relationships",
        priority: Priority::High,
    },
];

/// All static nudges whose trigger appears in the text, in table order.
pub fn match_static_nudges(text: &str) -> Vec<&'static StaticNudge> {
    let lower = text.to_lowercase();
    STATIC_NUDGES
        .iter()
        .filter(|n| lower.contains(n.trigger))
        .collect()
}

/// Five fixed day segments; late night wraps across midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaySegment {
    Morning,
    Midday,
    Afternoon,
    Evening,
    LateNight,
}

impl DaySegment {
    /// Map an hour of day (0-23) to its segment.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            6..=9 => DaySegment::Morning,
            10..=14 => DaySegment::Midday,
            15..=17 => DaySegment::Afternoon,
            18..=21 => DaySegment::Evening,
            _ => DaySegment::LateNight,
        }
    }

    pub fn tips(self) -> &'static [&'static str] {
        match self {
            DaySegment::Morning => &[
                "Good morning! Start your day with 3 deep breaths to set a positive intention.",
                "Morning check-in: How are you feeling today? Take a moment to acknowledge your emotions.",
                "Consider setting one small, achievable goal for today. What would make today feel successful?",
                "Remember to hydrate! Your brain works better when you're well-hydrated.",
            ],
            DaySegment::Midday => &[
                "Midday check-in: How's your energy? Consider a quick stretch or walk to refresh.",
                "Take a moment to check in with your body. Are you holding tension anywhere?",
                "If you're feeling overwhelmed, try the 5-4-3-2-1 grounding technique.",
                "Remember to take breaks! Your brain needs rest to maintain focus.",
            ],
            DaySegment::Afternoon => &[
                "Afternoon energy dip? Try a 5-minute walk or some gentle stretching.",
                "How are you feeling about your progress today? Celebrate small wins!",
                "Consider what you've accomplished so far. You're doing great!",
                "Take a moment to plan your evening. What would help you wind down?",
            ],
            DaySegment::Evening => &[
                "Evening reflection: What went well today? What are you grateful for?",
                "Start winding down. Consider what would help you relax and prepare for rest.",
                "Take a moment to acknowledge your efforts today. You showed up!",
                "Evening check-in: How are you feeling? What do you need right now?",
            ],
            DaySegment::LateNight => &[
                "It's getting late. Consider what would help you prepare for restful sleep.",
                "Late night thoughts? Try writing them down to clear your mind.",
                "Remember that rest is productive too. Your brain needs sleep to process and grow.",
                "Take a few deep breaths and let go of today's worries. Tomorrow is a new day.",
            ],
        }
    }
}

/// An activity pattern with its trigger keywords and tips.
#[derive(Debug, Clone, Copy)]
pub struct ActivityRule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub tips: &'static [&'static str],
}

pub const ACTIVITY_RULES: &[ActivityRule] = &[
    ActivityRule {
        name: "work_focus",
        triggers: &["meeting", "deadline", "project", "work", "task", "email"],
        tips: &[
            "You're in work mode. Remember to take short breaks every 45 minutes.",
            "Focus on one task at a time. Multitasking can reduce your effectiveness.",
            "If you're feeling stuck, try stepping away for 2 minutes and returning with fresh eyes.",
            "Remember your goals. What's the most important thing to accomplish right now?",
        ],
    },
    ActivityRule {
        name: "social_interaction",
        triggers: &["friend", "family", "colleague", "talk", "conversation", "meeting"],
        tips: &[
            "Social interactions can be energizing! How are you feeling about this connection?",
            "Remember to listen actively and be present in the conversation.",
            "If you're feeling anxious about social interaction, take a deep breath. You've got this!",
            "Authentic connections matter. Be yourself and trust the process.",
        ],
    },
    ActivityRule {
        name: "physical_activity",
        triggers: &["exercise", "workout", "run", "walk", "gym", "sport"],
        tips: &[
            "Great job moving your body! How does it feel?",
            "Remember to stay hydrated during your activity.",
            "Listen to your body. It's okay to adjust intensity as needed.",
            "Movement is medicine for both body and mind. You're doing something great for yourself!",
        ],
    },
    ActivityRule {
        name: "learning",
        triggers: &["study", "learn", "read", "research", "course", "skill"],
        tips: &[
            "Learning something new! Take breaks to let information sink in.",
            "Curiosity is a superpower. What interests you most about this topic?",
            "Remember that learning is a process. Be patient with yourself.",
            "Try explaining what you're learning to someone else - it helps retention!",
        ],
    },
];

/// First activity rule with a trigger in the text, in table order.
pub fn match_activity(lower_text: &str) -> Option<&'static ActivityRule> {
    ACTIVITY_RULES
        .iter()
        .find(|rule| rule.triggers.iter().any(|t| lower_text.contains(t)))
}
