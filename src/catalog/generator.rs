//! Built-in content catalog generator
//!
//! Produces the static Events -> Days -> Tasks tree. Output is fully
//! deterministic: same build, same catalog, so the cached blob can be
//! thrown away and rebuilt at any time. Titles, rewards and question
//! pools are content data; the progression engine never looks inside
//! them beyond ids, day numbers and rewards.

use super::{Day, Difficulty, Event, Question, Reward, Task, TaskKind};

struct EventSpec {
    id: &'static str,
    title: &'static str,
    subtitle: &'static str,
    description: &'static str,
    days: &'static [DaySpec],
}

struct DaySpec {
    title: &'static str,
    topic: &'static str,
}

static EVENT_SPECS: &[EventSpec] = &[
    EventSpec {
        id: "code-pulse",
        title: "Code Pulse",
        subtitle: "Foundations of rhythm reading",
        description: "Work from normal sinus rhythm up through the common rate disorders.",
        days: &[
            DaySpec { title: "Sinus Baseline", topic: "normal-sinus" },
            DaySpec { title: "Slow Rhythms", topic: "bradycardia" },
            DaySpec { title: "Fast Rhythms", topic: "tachycardia" },
            DaySpec { title: "Irregularly Irregular", topic: "atrial-fibrillation" },
            DaySpec { title: "Rate Disorder Review", topic: "rate-review" },
        ],
    },
    EventSpec {
        id: "rhythm-hunter",
        title: "Rhythm Hunter",
        subtitle: "Atrial and junctional arrhythmias",
        description: "Track down flutter waves, ectopic beats and re-entry circuits.",
        days: &[
            DaySpec { title: "Flutter Patterns", topic: "atrial-flutter" },
            DaySpec { title: "Premature Beats", topic: "ectopy" },
            DaySpec { title: "Narrow and Fast", topic: "svt" },
            DaySpec { title: "Hunter's Gauntlet", topic: "arrhythmia-review" },
        ],
    },
    EventSpec {
        id: "lead-master-quest",
        title: "Lead Master Quest",
        subtitle: "Conduction and the 12-lead",
        description: "Blocks, bundles and axis: what each lead is trying to tell you.",
        days: &[
            DaySpec { title: "AV Blocks I", topic: "av-block" },
            DaySpec { title: "Bundle Branch Blocks", topic: "bbb" },
            DaySpec { title: "High-Grade Blocks", topic: "high-grade-block" },
            DaySpec { title: "Conduction Finale", topic: "conduction-review" },
        ],
    },
    EventSpec {
        id: "shock-wave",
        title: "Shock Wave",
        subtitle: "Lethal rhythms under pressure",
        description: "VT, VF and the peri-arrest decisions that go with them.",
        days: &[
            DaySpec { title: "Wide and Dangerous", topic: "vt" },
            DaySpec { title: "Pulseless Patterns", topic: "arrest-rhythms" },
            DaySpec { title: "Crisis Hour", topic: "crisis" },
        ],
    },
];

/// Question pool, cycled across tasks by topic hash. Compact on purpose;
/// real deployments swap in the full authored banks.
static QUESTION_POOL: &[(&str, &str, &[&str], usize, &str)] = &[
    (
        "normal-sinus",
        "A regular rhythm at 75 bpm with upright P waves in lead II and a PR of 160 ms is:",
        &["Normal sinus rhythm", "Junctional rhythm", "Atrial flutter", "First-degree AV block"],
        0,
        "Upright sinus P waves, normal rate and a PR under 200 ms define normal sinus rhythm.",
    ),
    (
        "bradycardia",
        "Sinus rhythm at 42 bpm in an asymptomatic athlete most likely represents:",
        &["Sinus bradycardia", "Complete heart block", "Junctional escape", "Sinus arrest"],
        0,
        "High vagal tone in trained athletes commonly produces benign sinus bradycardia.",
    ),
    (
        "tachycardia",
        "A narrow-complex regular tachycardia at 150 bpm should raise suspicion for:",
        &["Atrial flutter with 2:1 block", "Sinus tachycardia", "Ventricular tachycardia", "Atrial fibrillation"],
        0,
        "Flutter circuits run near 300 bpm; 2:1 conduction lands almost exactly on 150.",
    ),
    (
        "atrial-fibrillation",
        "An irregularly irregular rhythm with no discernible P waves is:",
        &["Atrial fibrillation", "Sinus arrhythmia", "Second-degree block", "Multifocal atrial tachycardia"],
        0,
        "Fibrillatory baseline plus irregular R-R intervals is the AF signature.",
    ),
    (
        "atrial-flutter",
        "Sawtooth flutter waves are classically best seen in which leads?",
        &["II, III and aVF", "I and aVL", "V5 and V6", "aVR only"],
        0,
        "Typical flutter re-entry runs in the right atrium, projecting onto the inferior leads.",
    ),
    (
        "ectopy",
        "A premature wide QRS with a full compensatory pause is most likely:",
        &["A PVC", "A PAC", "An escape beat", "Artifact"],
        0,
        "Ventricular ectopy rarely resets the sinus node, so the pause is fully compensatory.",
    ),
    (
        "svt",
        "Abrupt onset and offset of a regular narrow tachycardia at 180 bpm suggests:",
        &["AVNRT", "Sinus tachycardia", "Atrial fibrillation", "Ventricular tachycardia"],
        0,
        "Re-entrant SVT starts and stops like a switch; sinus tach ramps gradually.",
    ),
    (
        "av-block",
        "A fixed PR interval of 280 ms with no dropped beats is:",
        &["First-degree AV block", "Mobitz I", "Mobitz II", "Complete heart block"],
        0,
        "PR prolongation beyond 200 ms with 1:1 conduction is first-degree block.",
    ),
    (
        "bbb",
        "A QRS of 140 ms with rsR' in V1 and deep slurred S in V6 indicates:",
        &["Right bundle branch block", "Left bundle branch block", "WPW", "Hyperkalemia"],
        0,
        "The M-shaped complex in V1 with a wide S in the lateral leads is classic RBBB.",
    ),
    (
        "high-grade-block",
        "P waves marching through at 90 bpm with an independent ventricular rate of 38 bpm is:",
        &["Third-degree AV block", "Mobitz I", "Sinus bradycardia", "Blocked PACs"],
        0,
        "AV dissociation with a slow escape defines complete heart block.",
    ),
    (
        "vt",
        "A regular wide-complex tachycardia with AV dissociation and fusion beats is:",
        &["Ventricular tachycardia", "SVT with aberrancy", "Atrial flutter", "Sinus tachycardia with BBB"],
        0,
        "Dissociation, capture and fusion beats are near-diagnostic for VT.",
    ),
    (
        "arrest-rhythms",
        "Coarse chaotic undulations with no organized QRS activity represent:",
        &["Ventricular fibrillation", "Asystole", "Torsades de pointes", "Fine AF"],
        0,
        "Disorganized ventricular activity without complexes is VF - a shockable rhythm.",
    ),
];

/// ECG strips referenced by generated tasks, keyed loosely by topic
static STRIP_POOL: &[&str] = &[
    "/ecg/medical_accurate/normal_75bpm.png",
    "/ecg/medical_accurate/bradycardia_42bpm_2.png",
    "/ecg/medical_accurate/tachycardia_150bpm.png",
    "/ecg/medical_accurate/atrial_fibrillation_110bpm_4.png",
    "/ecg/medical_accurate/atrial_flutter_150bpm_3.png",
    "/ecg/medical_accurate/rbbb_90bpm_3.png",
    "/ecg/medical_accurate/first_degree_av_block_70bpm_2.png",
    "/ecg/medical_accurate/ventricular_tachycardia_180bpm_3.png",
];

/// Deterministic tree of all events
pub fn generate_events() -> Vec<Event> {
    EVENT_SPECS.iter().map(build_event).collect()
}

fn build_event(spec: &EventSpec) -> Event {
    let days = spec
        .days
        .iter()
        .enumerate()
        .map(|(idx, day_spec)| build_day(spec, day_spec, idx as u32 + 1))
        .collect::<Vec<_>>();

    Event {
        id: spec.id.to_string(),
        title: spec.title.to_string(),
        subtitle: spec.subtitle.to_string(),
        description: spec.description.to_string(),
        total_days: days.len() as u32,
        days,
    }
}

fn build_day(event: &EventSpec, spec: &DaySpec, day_number: u32) -> Day {
    let day_id = format!("{}-day-{}", event.id, day_number);
    let difficulty = day_difficulty(day_number, event.days.len() as u32);

    let kinds = [
        TaskKind::EcgQuiz,
        TaskKind::RhythmRecognition,
        day_capstone_kind(day_number, event.days.len() as u32),
    ];

    let tasks = kinds
        .iter()
        .enumerate()
        .map(|(idx, &kind)| {
            build_task(&day_id, spec.topic, day_number, idx as u32 + 1, kind, difficulty)
        })
        .collect();

    Day {
        id: day_id,
        day_number,
        title: spec.title.to_string(),
        topic: spec.topic.to_string(),
        tasks,
    }
}

fn build_task(
    day_id: &str,
    topic: &str,
    day_number: u32,
    ordinal: u32,
    kind: TaskKind,
    difficulty: Difficulty,
) -> Task {
    let id = format!("{day_id}-task-{ordinal}");
    let seed = seed_for(&id);

    Task {
        id,
        day_id: day_id.to_string(),
        title: task_title(kind, topic),
        kind,
        difficulty,
        estimated_min: match difficulty {
            Difficulty::Easy => 5,
            Difficulty::Medium => 8,
            Difficulty::Hard => 10,
            Difficulty::Expert => 15,
        },
        reward: reward_for(difficulty, day_number),
        ecg_image: Some(STRIP_POOL[seed % STRIP_POOL.len()].to_string()),
        questions: questions_for(topic, seed),
    }
}

fn day_difficulty(day_number: u32, total_days: u32) -> Difficulty {
    if day_number == total_days {
        Difficulty::Expert
    } else if day_number * 3 <= total_days {
        Difficulty::Easy
    } else if day_number * 3 <= total_days * 2 {
        Difficulty::Medium
    } else {
        Difficulty::Hard
    }
}

fn day_capstone_kind(day_number: u32, total_days: u32) -> TaskKind {
    if day_number == total_days {
        TaskKind::CrisisSimulator
    } else if day_number % 2 == 0 {
        TaskKind::ClinicalScenario
    } else {
        TaskKind::FlashcardReview
    }
}

fn reward_for(difficulty: Difficulty, day_number: u32) -> Reward {
    let (xp, gems) = match difficulty {
        Difficulty::Easy => (50, 5),
        Difficulty::Medium => (75, 8),
        Difficulty::Hard => (100, 12),
        Difficulty::Expert => (150, 20),
    };
    Reward {
        xp: xp + day_number * 5,
        gems,
    }
}

fn task_title(kind: TaskKind, topic: &str) -> String {
    let noun = match kind {
        TaskKind::EcgQuiz => "Quiz",
        TaskKind::RhythmRecognition => "Strip Recognition",
        TaskKind::ClinicalScenario => "Clinical Scenario",
        TaskKind::FlashcardReview => "Flashcard Review",
        TaskKind::CrisisSimulator => "Crisis Simulator",
    };
    let pretty = topic.replace('-', " ");
    format!("{noun}: {pretty}")
}

/// Pick questions for a topic: exact matches first, then pool fillers so
/// every task carries at least two questions.
fn questions_for(topic: &str, seed: usize) -> Vec<Question> {
    let mut picked: Vec<Question> = QUESTION_POOL
        .iter()
        .filter(|(t, ..)| *t == topic)
        .map(to_question)
        .collect();

    let mut offset = 0;
    while picked.len() < 2 {
        let entry = &QUESTION_POOL[(seed + offset) % QUESTION_POOL.len()];
        offset += 1;
        if picked.iter().any(|q| q.prompt == entry.1) {
            continue;
        }
        picked.push(to_question(entry));
    }
    picked
}

fn to_question(entry: &(&str, &str, &[&str], usize, &str)) -> Question {
    Question {
        prompt: entry.1.to_string(),
        options: entry.2.iter().map(|s| s.to_string()).collect(),
        correct: entry.3,
        explanation: entry.4.to_string(),
    }
}

/// Stable small hash so content assignment never depends on process state
fn seed_for(id: &str) -> usize {
    id.bytes().fold(0usize, |acc, b| {
        acc.wrapping_mul(31).wrapping_add(b as usize)
    })
}
