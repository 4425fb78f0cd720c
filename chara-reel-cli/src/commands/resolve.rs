use chara_reel_core::parse_video_id;

/// Print one resolved id per input, or `-` when it does not resolve.
pub(crate) fn run_resolve(inputs: &[String]) {
    for input in inputs {
        match parse_video_id(input) {
            Some(id) => println!("{id}"),
            None => {
                log::debug!("No video id in {:?}", input);
                println!("-");
            }
        }
    }
}
