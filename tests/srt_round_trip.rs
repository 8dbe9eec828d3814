use std::fs;

use cuecraft::{
    Cue, Error, OutputType, SegmentationOpts, Token, decode_srt, encode_srt, segment,
    write_subtitles,
};

fn transcript() -> Vec<Token> {
    let script = [
        ("Welcome", 0, 400),
        ("back,", 400, 900),
        ("everyone.", 900, 1_500),
        ("Today", 2_600, 3_000),
        ("we're", 3_000, 3_200),
        ("looking", 3_200, 3_600),
        ("at", 3_600, 3_700),
        ("how", 3_700, 3_900),
        ("subtitles", 3_900, 4_500),
        ("get", 4_500, 4_700),
        ("their", 4_700, 4_900),
        ("timing,", 4_900, 5_400),
        ("and", 5_450, 5_600),
        ("why", 5_600, 5_800),
        ("it", 5_800, 5_900),
        ("matters.", 5_900, 6_600),
        ("Ready?", 8_000, 8_400),
    ];
    script
        .iter()
        .map(|&(text, start, end)| Token::new(text, start, end))
        .collect()
}

#[test]
fn encoded_cues_decode_back_exactly() -> anyhow::Result<()> {
    let cues = segment(&transcript(), &SegmentationOpts::default())?;
    let srt = encode_srt(&cues)?;
    assert_eq!(decode_srt(&srt)?, cues);
    Ok(())
}

#[test]
fn timestamps_are_byte_exact() -> anyhow::Result<()> {
    let srt = encode_srt(&[Cue::new(1_500, 62_007, vec!["Hi".to_owned()])])?;
    assert_eq!(srt, "1\n00:00:01,500 --> 00:01:02,007\nHi\n\n");
    assert!(!srt.contains("0:0:1.5"));
    Ok(())
}

#[test]
fn indices_ignore_where_cues_came_from() -> anyhow::Result<()> {
    let decoded = decode_srt(
        "41\n00:00:00,000 --> 00:00:01,000\nA\n\n99\n00:00:02,000 --> 00:00:03,000\nB\n",
    )?;
    let srt = encode_srt(&decoded)?;
    assert!(srt.starts_with("1\n"));
    assert!(srt.contains("\n\n2\n00:00:02,000"));
    Ok(())
}

#[test]
fn encoding_nothing_is_an_error() {
    assert!(matches!(encode_srt(&[]), Err(Error::EmptyInput)));
}

#[test]
fn srt_file_written_to_disk_reads_back() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(format!("talk.{}", OutputType::Srt.extension()));

    let file = fs::File::create(&path)?;
    let opts = SegmentationOpts::default();
    let written = write_subtitles(&transcript(), &opts, OutputType::Srt, file)?;

    let text = fs::read_to_string(&path)?;
    let cues = decode_srt(&text)?;
    assert_eq!(cues.len(), written);
    assert!(text.lines().all(|line| !line.ends_with('\r')));
    assert!(text.ends_with("Ready?\n\n"));
    Ok(())
}
