// ─── Bundle Launcher Core ───
// Starts a Java application packaged as a bundle by handing it to the runtime's JLI_Launch.
//
// Architecture:
//   core/
//     bundle/     Info.plist parsing, bundle layout, placeholder substitution
//     java/       Version parsing, runtime probing, discovery, libjli lookup
//     platform/   Host queries (memory, special folders, preferences, appearance)
//     launch/     Argument assembly + JLI_Launch invocation
//     launcher    Orchestration from configuration to hand-off
//     host        Alerts and privileged relaunch
//     context     Per-process run switches

pub mod bundle;
pub mod context;
pub mod error;
pub mod host;
pub mod java;
pub mod launch;
pub mod launcher;
pub mod platform;
