//! Input event loop driving a filter session

use anyhow::Result;
use filter_pipeline::{Channel, LabelSink, OutputSink, Session};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

pub mod input;
pub mod sink;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventStats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Feed every line of `reader` to the session, one event at a time
pub async fn process_events<R, S, L>(reader: R, session: &mut Session<S, L>) -> Result<EventStats>
where
    R: AsyncBufRead + Unpin,
    S: OutputSink,
    L: LabelSink,
{
    let mut stats = EventStats::default();
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let Some(event) = input::parse_line(&line) else {
            continue;
        };

        if session.try_set(&event.name, event.value) {
            stats.accepted += 1;

            if let Some(frame) = session.working() {
                log::debug!("mean red component: {:.2}", frame.channel_mean(Channel::Red));
            }
        } else {
            stats.rejected += 1;
            log::info!("ignored input `{}`", line.trim());
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use filter_pipeline::{LabelBoard, MemorySink, PixelBuffer};

    #[tokio::test]
    async fn test_process_events() {
        let mut session = Session::new(MemorySink::new(), LabelBoard::new());
        session
            .load_image(PixelBuffer::from_raw(2, 2, [255, 0, 0, 255].repeat(4)).unwrap())
            .unwrap();

        let script = b"# warm up\nbrightness 10\nbrightness 10\ncontrast 5\n\ngrayscale=true\nredChannel 300\n";
        let stats = process_events(&script[..], &mut session).await.unwrap();

        assert_eq!(
            stats,
            EventStats {
                accepted: 2,
                rejected: 3
            }
        );
        assert_eq!(session.sink().presented(), 3);
        assert_eq!(
            session.sink().frame().unwrap().as_bytes(),
            [85u8, 85, 85, 255].repeat(4).as_slice()
        );
    }

    #[tokio::test]
    async fn test_events_before_image_are_rejected() {
        let mut session = Session::without_labels(MemorySink::new());
        let stats = process_events(&b"brightness 10\n"[..], &mut session)
            .await
            .unwrap();

        assert_eq!(stats.rejected, 1);
        assert_eq!(session.sink().presented(), 0);
    }
}
