//! Integration tests for container launch and bootstrap.
//!
//! These tests are implemented in:
//! `crates/vessel-runtime/tests/bootstrap_e2e.rs`
//!
//! Covered scenarios:
//! - `bootstrap_runs_every_step_in_the_mandatory_order`: The ten-step isolation sequence
//! - `mount_private_always_precedes_the_overlay_mount`: Mount propagation ordering
//! - `hostname_is_the_deterministic_container_id`: UTS identity from `<name>_<tag>`
//! - `overlay_combines_image_contents_with_container_dirs`: lower/upper/work wiring
//! - `pseudo_filesystems_target_paths_under_the_new_root`: /proc, /sys, /dev placement
//! - `pivot_parks_the_old_root_inside_the_new_root`: pivot-root and detach targets
//! - `exec_receives_the_user_command_verbatim_and_runs_last`: Final hand-off
//! - `a_failing_step_aborts_with_no_later_operations`: Fail-fast, no partial fallback
//! - `composition_wipes_residue_from_a_previous_session`: Destructive reset invariant
//! - `image_contents_survive_a_container_session_untouched`: Write isolation
