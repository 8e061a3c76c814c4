use clap::Parser;
use micap_core::codec::hand_json::hands_from_path;
use micap_core::common::hand_joint::HandJoint;
use micap_core::hand::{preprocess_recording, solve_hand};
use micap_core::retarget::{import_clip, BoneBinding, ChannelBank};
use nalgebra as na;
use serde::Serialize;
use strum::IntoEnumIterator;

#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "Binary that takes a hand-capture recording (JSON) as input, solves per-joint \
                  bone transforms and prints a JSON summary of the baked keyframe channels"
)]
struct Args {
    /// Input file. MUST be a JSON recording with 21 world positions per frame.
    #[arg(short, long)]
    input: String,
    /// Target palm size (wrist to middle knuckle) in scene units.
    #[arg(long, default_value_t = 0.1)]
    palm_size: f32,
}

#[derive(Serialize)]
struct ImportSummary {
    file: String,
    hands: Vec<HandSummary>,
}

#[derive(Serialize)]
struct HandSummary {
    name: String,
    hand_type: String,
    num_frames: usize,
    duration: f32,
    num_bones: usize,
    num_keyframes: usize,
    bones: Vec<String>,
}

fn main() -> micap_core::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let recordings = hands_from_path(&args.input)?;
    let mut summaries = Vec::with_capacity(recordings.len());
    for recording in &recordings {
        let hand = preprocess_recording(recording, args.palm_size)?;
        let clip = solve_hand(&hand)?;

        // Bind every solved joint; the wrist never appears in the clip.
        let bones: Vec<String> = HandJoint::iter().map(|joint| format!("{}_{joint}", hand.name)).collect();
        let binding = BoneBinding::for_hand(&hand.name, &bones);

        // Joint positions are already scaled to the palm size, so the clip
        // passes through unscaled.
        let mut bank = ChannelBank::default();
        let num_keyframes = import_clip(&clip, &binding, 1.0, &na::Vector3::new(1.0, 1.0, 1.0), &mut bank)?;

        summaries.push(HandSummary {
            name: hand.name.clone(),
            hand_type: hand.hand_type.to_string(),
            num_frames: clip.frames().len(),
            duration: clip.duration(),
            num_bones: bank.num_bones(),
            num_keyframes,
            bones: bank.bones().map(|(name, _)| name.to_string()).collect(),
        });
    }

    let summary = ImportSummary {
        file: args.input,
        hands: summaries,
    };
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize summary to JSON: {e}"),
    }
    Ok(())
}
