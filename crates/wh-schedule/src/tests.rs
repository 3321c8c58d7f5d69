//! Unit tests for wh-schedule.

// ── JobBook ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod job_book {
    use wh_core::{NodeId, Position, RobotId};
    use crate::{Job, JobBook, ScheduleError};

    fn job(n: u32) -> Job {
        Job { node: NodeId(n), dock: Position::new(n as f32, 0.0) }
    }

    #[test]
    fn fifo_per_robot() {
        let mut book = JobBook::new(2);
        let r = RobotId(1);
        for n in [4, 2, 9] {
            book.enqueue(r, job(n)).unwrap();
        }
        assert_eq!(book.len(r), 3);
        assert_eq!(book.pop_next(r).unwrap().node, NodeId(4));
        assert_eq!(book.pop_next(r).unwrap().node, NodeId(2));
        assert_eq!(book.pop_next(r).unwrap().node, NodeId(9));
        assert!(book.is_done(r));
    }

    #[test]
    fn queues_are_independent() {
        let mut book = JobBook::new(3);
        book.enqueue(RobotId(0), job(1)).unwrap();
        book.enqueue(RobotId(2), job(2)).unwrap();
        assert!(!book.is_done(RobotId(0)));
        assert!(book.is_done(RobotId(1)));
        assert_eq!(book.total(), 2);
        assert_eq!(book.peek(RobotId(2)).map(|j| j.node), Some(NodeId(2)));
    }

    #[test]
    fn pop_on_empty_queue_is_error() {
        let mut book = JobBook::new(1);
        assert!(matches!(book.pop_next(RobotId(0)), Err(ScheduleError::EmptyQueue(RobotId(0)))));
    }

    #[test]
    fn unknown_robot() {
        let mut book = JobBook::new(1);
        assert!(matches!(
            book.enqueue(RobotId(5), job(0)),
            Err(ScheduleError::RobotNotFound(RobotId(5)))
        ));
        assert!(book.is_done(RobotId(5)));
        assert_eq!(book.len(RobotId(5)), 0);
    }
}

// ── Command parsing ───────────────────────────────────────────────────────────

#[cfg(test)]
mod commands {
    use wh_core::BoxId;
    use crate::{Command, ScheduleError, parse_batch, parse_line};

    #[test]
    fn all_keywords() {
        assert_eq!(parse_line(1, "Create_Box 2").unwrap(), Some(Command::CreateBox { pickup: 2 }));
        assert_eq!(
            parse_line(1, "Deliver_Box 0,3").unwrap(),
            Some(Command::DeliverBox { from: 0, to: 3 })
        );
        assert_eq!(
            parse_line(1, "Retrieve_Box\t5, 1").unwrap(),
            Some(Command::RetrieveBox { box_id: BoxId(5), to: 1 })
        );
        assert_eq!(
            parse_line(1, "Move_Box 5 7").unwrap(),
            Some(Command::MoveBox { box_id: BoxId(5), to: 7 })
        );
        assert_eq!(parse_line(1, "Job_Completed").unwrap(), Some(Command::JobCompleted));
        assert_eq!(parse_line(1, "Timeout").unwrap(), Some(Command::Timeout));
    }

    #[test]
    fn mixed_separators_collapse() {
        assert_eq!(
            parse_line(1, "  Deliver_Box , 1 ,\t2  ").unwrap(),
            Some(Command::DeliverBox { from: 1, to: 2 })
        );
    }

    #[test]
    fn blank_and_unknown_lines_skipped() {
        assert_eq!(parse_line(1, "").unwrap(), None);
        assert_eq!(parse_line(1, " \t ,").unwrap(), None);
        assert_eq!(parse_line(1, "Dance 3").unwrap(), None);
    }

    #[test]
    fn too_many_arguments() {
        match parse_line(4, "Create_Box 1 2") {
            Err(ScheduleError::Syntax { line, .. }) => assert_eq!(line, 4),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn too_few_arguments() {
        assert!(matches!(parse_line(1, "Move_Box 3"), Err(ScheduleError::Syntax { .. })));
        assert!(matches!(parse_line(1, "Job_Completed now"), Err(ScheduleError::Syntax { .. })));
    }

    #[test]
    fn non_integer_argument() {
        assert!(matches!(parse_line(1, "Create_Box two"), Err(ScheduleError::Syntax { .. })));
        assert!(matches!(parse_line(1, "Deliver_Box 0,-1"), Err(ScheduleError::Syntax { .. })));
    }

    #[test]
    fn batch_keeps_order_and_skips_blanks() {
        let cmds = parse_batch("Create_Box 0\n\nDeliver_Box 1,2\r\nJob_Completed\n").unwrap();
        assert_eq!(
            cmds,
            vec![
                Command::CreateBox { pickup: 0 },
                Command::DeliverBox { from: 1, to: 2 },
                Command::JobCompleted,
            ]
        );
    }

    #[test]
    fn one_bad_line_rejects_batch() {
        match parse_batch("Create_Box 0\nMove_Box x,1\nCreate_Box 1") {
            Err(ScheduleError::Syntax { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn display_round_trips_through_parser() {
        let cmd = Command::RetrieveBox { box_id: BoxId(12), to: 3 };
        assert_eq!(cmd.to_string(), "Retrieve_Box 12,3");
        assert_eq!(parse_line(1, &cmd.to_string()).unwrap(), Some(cmd));
    }
}

// ── DueQueue ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod due_queue {
    use wh_core::Tick;
    use crate::DueQueue;

    #[test]
    fn drains_only_due_items_in_order() {
        let mut q = DueQueue::new();
        q.push(Tick(10), "b");
        q.push(Tick(5), "a");
        q.push(Tick(10), "c");
        q.push(Tick(20), "d");
        assert_eq!(q.len(), 4);

        assert!(q.drain_due(Tick(4)).is_empty());
        assert_eq!(q.drain_due(Tick(10)), vec!["a", "b", "c"]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.next_tick(), Some(Tick(20)));
        assert_eq!(q.last_tick(), Some(Tick(20)));
    }

    #[test]
    fn late_drain_collects_everything_overdue() {
        let mut q = DueQueue::new();
        q.push(Tick(1), 1);
        q.push(Tick(2), 2);
        assert_eq!(q.drain_due(Tick(100)), vec![1, 2]);
        assert!(q.is_empty());
        assert_eq!(q.next_tick(), None);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::{Cursor, Write};

    use crate::{Command, load_commands_file, load_commands_reader};

    #[test]
    fn reader() {
        let cmds = load_commands_reader(Cursor::new("Create_Box 1\nTimeout\n")).unwrap();
        assert_eq!(cmds, vec![Command::CreateBox { pickup: 1 }, Command::Timeout]);
    }

    #[test]
    fn file() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "Deliver_Box 0,1").unwrap();
        writeln!(f, "Job_Completed").unwrap();
        let cmds = load_commands_file(f.path()).unwrap();
        assert_eq!(cmds.len(), 2);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = load_commands_file(std::path::Path::new("/nonexistent/commands.txt")).unwrap_err();
        assert!(matches!(err, crate::ScheduleError::Io(_)));
    }
}
