//! Drive a scripted trial and print the finished result

use synheart_survey::clock::ManualClock;
use synheart_survey::normalizer::ThreadRngRandomizer;
use synheart_survey::{Outcome, SurveyConfig, SurveyController};

fn main() {
    let json = r#"{
        "questions": [
            { "prompt": "I felt calm during the last hour.",
              "labels": ["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"] },
            { "prompt": "I felt tense during the last hour.",
              "labels": ["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"],
              "reverse": true },
            { "prompt": "I had enough energy for what I wanted to do.",
              "labels": ["Strongly disagree", "Disagree", "Neutral", "Agree", "Strongly agree"] }
        ],
        "allow_backward": false
    }"#;

    let config: SurveyConfig = match serde_json::from_str(json) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            return;
        }
    };

    let clock = ManualClock::new();
    let mut randomizer = ThreadRngRandomizer;
    let mut controller =
        match SurveyController::with_services(config, Box::new(clock.clone()), &mut randomizer) {
            Ok(controller) => controller,
            Err(e) => {
                eprintln!("Error: {e}");
                return;
            }
        };

    let script = [
        ("q1", 3, 900, 1400),
        ("q2", 1, 2100, 2600),
        ("q3", 4, 3300, 3700),
    ];
    for (name, option_pos, select_at, advance_at) in script {
        clock.set(select_at);
        controller.on_select(name, option_pos);
        clock.set(advance_at);
        if let Outcome::Finished(result) = controller.on_advance_requested() {
            match serde_json::to_string_pretty(&result) {
                Ok(out) => println!("{out}"),
                Err(e) => eprintln!("Error: {e}"),
            }
        }
    }
}
