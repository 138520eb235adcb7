use std::{io::Result as IoResult, thread::Builder as ThreadBuilder};

// 请求之间互相独立，每次调度都使用独立的命名后台线程
pub(crate) fn spawn<F: FnOnce() + Send + 'static>(task_name: String, f: F) -> IoResult<()> {
    ThreadBuilder::new().name(task_name).spawn(f).map(|_| ())
}
