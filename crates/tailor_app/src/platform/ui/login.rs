use std::fmt::Write as _;

pub fn render(pending: bool) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Welcome to ResumeTailor AI");
    let _ = writeln!(
        out,
        "Optimize your resume for the job you want, or audit it against industry best practices."
    );
    let _ = writeln!(out);
    if pending {
        let _ = writeln!(out, "Signing in...");
    } else {
        let _ = writeln!(out, "[ Continue with Google ]  type `login` to sign in.");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_login_hides_the_action() {
        let idle = render(false);
        assert!(idle.contains("Continue with Google"));
        assert!(idle.contains("`login`"));
        let pending = render(true);
        assert!(pending.contains("Signing in..."));
        assert!(!pending.contains("`login`"));
        assert!(!pending.contains("Continue"));
    }
}
