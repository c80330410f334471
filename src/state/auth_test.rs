use super::*;

fn user_with_role(role: Role) -> User {
    User { id: "u1".to_owned(), username: "alice".to_owned(), email: "a@b.com".to_owned(), role }
}

#[test]
fn default_state_is_unauthenticated_and_not_loading() {
    let state = AuthState::default();
    assert!(!state.loading);
    assert!(!state.is_authenticated());
    assert_eq!(state.phase(), SessionPhase::Unauthenticated);
}

#[test]
fn loading_state_reports_loading_phase() {
    let state = AuthState::loading();
    assert!(state.loading);
    assert_eq!(state.phase(), SessionPhase::Loading);
}

#[test]
fn role_flags_are_false_without_user() {
    let state = AuthState::default();
    assert!(!state.is_admin());
    assert!(!state.is_editor());
    assert!(!state.is_viewer());
    assert_eq!(state.role(), None);
}

#[test]
fn exactly_one_role_flag_matches_user_role() {
    for role in [Role::Admin, Role::Editor, Role::Viewer] {
        let state = AuthState { user: Some(user_with_role(role)), loading: false };
        let flags = [state.is_admin(), state.is_editor(), state.is_viewer()];
        assert_eq!(flags.iter().filter(|f| **f).count(), 1, "role {role}");
        assert_eq!(state.is_admin(), role == Role::Admin);
        assert_eq!(state.is_editor(), role == Role::Editor);
        assert_eq!(state.is_viewer(), role == Role::Viewer);
    }
}

#[test]
fn authenticated_phase_when_user_present() {
    let state = AuthState { user: Some(user_with_role(Role::Viewer)), loading: false };
    assert_eq!(state.phase(), SessionPhase::Authenticated);
}
