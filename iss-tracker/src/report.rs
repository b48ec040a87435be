use iss_common::PassWindow;

/// One human readable line per pass, in the order given.
pub fn format_pass_times(passes: &[PassWindow]) -> Vec<String> {
    passes.iter().map(format_pass).collect()
}

fn format_pass(pass: &PassWindow) -> String {
    let when = match pass.rise_time() {
        Some(rise) => rise.format("%a %b %d %Y %H:%M:%S UTC").to_string(),
        None => pass.risetime.to_string(),
    };
    format!("Next pass at {} for {} seconds!", when, pass.duration)
}
