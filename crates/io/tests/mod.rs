//! Stream Buffer Integration Test Suite
//!
//! End-to-end scenarios across the codecs: producer/consumer hand-off,
//! buffer reuse, deep object nesting and truncated input.

use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("bridge_io=debug"))
        .with_test_writer()
        .try_init();
}

mod scenario_tests {
    use super::init_tracing;
    use bridge_io::StreamBuffer;

    #[test]
    fn test_mixed_values_through_finalized_bytes() {
        init_tracing();

        let mut writer = StreamBuffer::new();
        writer.write_i32(-42);
        writer.write_str("hi").unwrap();
        writer.write_bytes(&[0xFF, 0x00]).unwrap();
        let bytes = writer.finalize();

        let mut reader = StreamBuffer::from_bytes(bytes);
        assert_eq!(reader.read_i32().unwrap(), -42);
        assert_eq!(reader.read_string().unwrap(), "hi");
        assert_eq!(reader.read_bytes().unwrap(), vec![0xFF, 0x00]);
        assert!(!reader.has_more());
    }

    #[test]
    fn test_cursor_independence() {
        let mut stream = StreamBuffer::new();
        for i in 0..10 {
            stream.write_i32(i);
        }
        let written = stream.write_index();
        assert_eq!(written, 40);

        for i in 0..4 {
            assert_eq!(stream.read_i32().unwrap(), i);
        }
        assert_eq!(stream.write_index(), written);
        assert_eq!(stream.read_index(), 16);

        stream.clear_keep_buffer();
        assert_eq!(stream.write_index(), 0);
        assert_eq!(stream.read_index(), 0);

        // The old bytes are still in the store until overwritten.
        stream.advance_write(8).unwrap();
        assert_eq!(stream.read_i32().unwrap(), 0);
        assert_eq!(stream.read_i32().unwrap(), 1);
    }

    #[test]
    fn test_finalize_trims_grown_slack() {
        init_tracing();

        let mut stream = StreamBuffer::new();
        stream.write_bytes(&[0x11; 1500]).unwrap();
        assert!(stream.capacity() >= 1024);

        stream.clear_keep_buffer();
        stream.write_u8(0x7F);
        assert_eq!(stream.finalize(), vec![0x7F]);
        assert!(stream.capacity() >= 1024);
    }

    #[test]
    fn test_interleaved_write_and_read() {
        let mut stream = StreamBuffer::new();
        stream.write_i64(1);
        assert_eq!(stream.read_i64().unwrap(), 1);
        stream.write_str("later").unwrap();
        assert!(stream.has_more());
        assert_eq!(stream.read_string().unwrap(), "later");
        assert!(!stream.has_more());
    }

    #[test]
    fn test_raw_append_then_typed_read() {
        let mut stream = StreamBuffer::new();
        stream.append_raw(&7i32.to_le_bytes());
        stream.append_raw(&[1]);
        assert_eq!(stream.read_i32().unwrap(), 7);
        assert!(stream.read_bool().unwrap());
    }
}

mod framing_tests {
    use bridge_io::{
        IoError, IoResult, Quaternion, ReadLimits, Serializable, StreamBuffer, Vector3,
    };

    /// Each level carries its own fields plus an optional child level.
    #[derive(Debug, Default, PartialEq)]
    struct Level {
        depth: i32,
        name: String,
        weights: Vec<f32>,
        child: Option<Box<Level>>,
        trailer: i64,
    }

    impl Level {
        fn chain(levels: i32) -> Self {
            let mut current: Option<Box<Level>> = None;
            for depth in (0..levels).rev() {
                current = Some(Box::new(Level {
                    depth,
                    name: format!("level-{depth}"),
                    weights: vec![depth as f32, -(depth as f32)],
                    child: current,
                    trailer: -(depth as i64) * 1_000_000_007,
                }));
            }
            *current.unwrap_or_default()
        }
    }

    impl Serializable for Level {
        fn serialize(&self, writer: &mut StreamBuffer) -> IoResult<()> {
            writer.write_i32(self.depth);
            writer.write_str(&self.name)?;
            writer.write_f32_list(&self.weights)?;
            writer.write_optional_object(self.child.as_deref())?;
            writer.write_i64(self.trailer);
            Ok(())
        }

        fn deserialize(&mut self, reader: &mut StreamBuffer) -> IoResult<()> {
            self.depth = reader.read_i32()?;
            self.name = reader.read_string()?;
            self.weights = reader.read_f32_list()?;
            self.child = reader.read_optional_object::<Level>()?.map(Box::new);
            self.trailer = reader.read_i64()?;
            Ok(())
        }
    }

    #[derive(Debug, Default, PartialEq)]
    struct Transform {
        position: Vector3,
        rotation: Quaternion,
    }

    impl Serializable for Transform {
        fn serialize(&self, writer: &mut StreamBuffer) -> IoResult<()> {
            writer.write_vector3(self.position);
            writer.write_quaternion(self.rotation);
            Ok(())
        }

        fn deserialize(&mut self, reader: &mut StreamBuffer) -> IoResult<()> {
            self.position = reader.read_vector3()?;
            self.rotation = reader.read_quaternion()?;
            Ok(())
        }
    }

    #[test]
    fn test_five_level_nesting() {
        let root = Level::chain(5);

        let mut stream = StreamBuffer::new();
        stream.write_object(&root).unwrap();
        stream.write_i32(0x5EED);

        let mut reader = StreamBuffer::from_bytes(stream.finalize());
        let decoded: Level = reader.read_object().unwrap();
        assert_eq!(reader.read_i32().unwrap(), 0x5EED);
        assert_eq!(decoded, root);

        let mut level = Some(&decoded);
        let mut seen = 0;
        while let Some(current) = level {
            assert_eq!(current.depth, seen);
            assert_eq!(current.name, format!("level-{seen}"));
            assert_eq!(current.trailer, -(seen as i64) * 1_000_000_007);
            level = current.child.as_deref();
            seen += 1;
        }
        assert_eq!(seen, 5);
    }

    #[test]
    fn test_depth_limit_on_read() {
        let root = Level::chain(5);
        let mut stream = StreamBuffer::new();
        stream.write_object(&root).unwrap();

        let limits = ReadLimits {
            max_depth: 3,
            ..ReadLimits::default()
        };
        let mut reader = StreamBuffer::from_bytes(stream.finalize()).with_limits(limits);
        assert_eq!(
            reader.read_object::<Level>(),
            Err(IoError::NestingTooDeep { depth: 4, max: 3 })
        );
    }

    #[test]
    fn test_object_lists_with_sibling_isolation() {
        let transforms = vec![
            Transform {
                position: Vector3::new(1.0, 2.0, 3.0),
                rotation: Quaternion::IDENTITY,
            },
            Transform::default(),
        ];

        let mut stream = StreamBuffer::new();
        stream.write_object_list(&transforms).unwrap();
        stream.write_object_list::<Transform>(&[]).unwrap();
        stream.write_str("after").unwrap();

        assert_eq!(stream.read_object_list::<Transform>().unwrap(), transforms);
        assert!(stream.read_object_list::<Transform>().unwrap().is_empty());
        assert_eq!(stream.read_string().unwrap(), "after");
    }

    #[test]
    fn test_truncated_frame() {
        let mut stream = StreamBuffer::new();
        stream.write_object(&Level::chain(2)).unwrap();
        let mut bytes = stream.finalize();
        bytes.truncate(bytes.len() - 3);

        let mut reader = StreamBuffer::from_bytes(bytes);
        assert!(matches!(
            reader.read_object::<Level>(),
            Err(IoError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_frame_longer_than_object_leaves_parent_aligned() {
        let mut inner = StreamBuffer::new();
        Transform::default().serialize(&mut inner).unwrap();
        inner.write_i32(123);

        let mut stream = StreamBuffer::new();
        stream.write_stream(Some(&inner)).unwrap();
        stream.write_bool(true);

        let decoded: Transform = stream.read_object().unwrap();
        assert_eq!(decoded, Transform::default());
        assert!(stream.read_bool().unwrap());
    }
}
