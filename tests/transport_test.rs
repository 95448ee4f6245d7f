//! Frames handed to an async transport task through `ChannelSink`.

use droplet_tetris::core::FixedPieces;
use droplet_tetris::engine::{Board, ChannelSink, Engine, ManualClock, Tetris, Timing};
use droplet_tetris::types::{PieceKind, Reservoir, DEFAULT_NIBBLE, FRAME_LEN};

#[tokio::test]
async fn test_transport_task_receives_every_frame() {
    let (sink, mut rx) = ChannelSink::channel();
    let clock = ManualClock::new();
    let board = Board::new(Timing::from_millis(10, 10), Box::new(clock.clone())).with_sink(sink);
    let mut engine = Engine::new(board, Tetris::new(FixedPieces::new(vec![PieceKind::I])));

    // init: clear frame; then one update with a dispense (9 frames) plus the frame transmit.
    engine.init();
    clock.advance(11);
    engine.update();
    drop(engine);

    let transport = tokio::spawn(async move {
        let mut bytes = Vec::new();
        while let Some(frame) = rx.recv().await {
            bytes.extend_from_slice(frame.as_bytes());
        }
        bytes
    });
    let bytes = transport.await.unwrap();

    assert_eq!(bytes.len() % FRAME_LEN, 0);
    let frames: Vec<&[u8]> = bytes.chunks(FRAME_LEN).collect();
    assert_eq!(frames.len(), 11);

    assert!(frames[0].iter().all(|&b| b == 0));
    let last = frames[frames.len() - 1];
    assert_eq!(last[0] & 0x0F, Reservoir::TopLeft.wire_nibble(DEFAULT_NIBBLE));
}
