use std::collections::VecDeque;
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::command::{RenderCommand, RenderCommandBuffer};
use crate::config::CommandBufferQueueConfig;
use crate::snapshot::{RenderSnapshot, RenderSnapshotSystem};
use crate::types::TargetType;

struct QueueState {
    buffers: VecDeque<RenderCommandBuffer>,
    suspended: bool,
}

#[derive(Default)]
struct RecycledCommands {
    loads: Vec<RenderCommand>,
    unloads: Vec<RenderCommand>,
}

/// Bounded queue of compiled command buffers between the thread building
/// snapshots and the thread processing commands.
///
/// While suspended, queued and newly pushed buffers are discarded, but
/// their resource load and unload commands are kept and re-emitted into the
/// next main-target snapshot once resumed, so no resource is ever leaked or
/// left unloaded.
pub struct RenderCommandBufferManager {
    max_queued_buffers: usize,
    queue: Mutex<QueueState>,
    condition: Condvar,
    recycled: Mutex<RecycledCommands>,
}

impl RenderCommandBufferManager {
    /// # Panics
    ///
    /// Panics if `config.max_queued_buffers` is zero.
    pub fn new(config: CommandBufferQueueConfig) -> Self {
        assert!(
            config.max_queued_buffers > 0,
            "A command buffer queue must hold at least one buffer"
        );
        Self {
            max_queued_buffers: config.max_queued_buffers,
            queue: Mutex::new(QueueState {
                buffers: VecDeque::with_capacity(config.max_queued_buffers),
                suspended: false,
            }),
            condition: Condvar::new(),
            recycled: Mutex::new(RecycledCommands::default()),
        }
    }

    /// Queue `buffer`, blocking while the queue is full.
    pub fn wait_then_push(&self, buffer: RenderCommandBuffer) {
        let mut state = self.queue.lock();
        while state.buffers.len() >= self.max_queued_buffers && !state.suspended {
            self.condition.wait(&mut state);
        }

        if state.suspended {
            log::warn!(
                "Render command buffer pushed while suspended, recycling its resource commands"
            );
            self.recycle(buffer);
        } else {
            state.buffers.push_back(buffer);
        }
        self.condition.notify_all();
    }

    /// Take the oldest buffer, blocking until one is available.
    pub fn wait_then_pop(&self) -> RenderCommandBuffer {
        let mut state = self.queue.lock();
        loop {
            if let Some(buffer) = state.buffers.pop_front() {
                self.condition.notify_all();
                return buffer;
            }
            self.condition.wait(&mut state);
        }
    }

    /// Take the oldest buffer, waiting at most `timeout` for one to arrive.
    pub fn wait_then_pop_timeout(&self, timeout: Duration) -> Option<RenderCommandBuffer> {
        let deadline = Instant::now() + timeout;
        let mut state = self.queue.lock();
        loop {
            if let Some(buffer) = state.buffers.pop_front() {
                self.condition.notify_all();
                return Some(buffer);
            }
            if self.condition.wait_until(&mut state, deadline).timed_out() {
                return None;
            }
        }
    }

    /// Take the oldest buffer if there is one.
    pub fn try_pop(&self) -> Option<RenderCommandBuffer> {
        let mut state = self.queue.lock();
        let buffer = state.buffers.pop_front();
        if buffer.is_some() {
            self.condition.notify_all();
        }
        buffer
    }

    /// Number of buffers waiting for the consumer.
    pub fn len(&self) -> usize {
        self.queue.lock().buffers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn max_queued_buffers(&self) -> usize {
        self.max_queued_buffers
    }

    pub fn is_suspended(&self) -> bool {
        self.queue.lock().suspended
    }

    /// Stop queuing. Buffers already queued are discarded and their
    /// resource commands recycled.
    pub fn suspend(&self) {
        let mut state = self.queue.lock();
        state.suspended = true;
        let discarded = state.buffers.len();
        for buffer in state.buffers.drain(..) {
            self.recycle(buffer);
        }
        drop(state);

        log::info!("Render command buffer queue suspended, {discarded} buffers discarded");
        self.condition.notify_all();
    }

    pub fn resume(&self) {
        self.queue.lock().suspended = false;
        log::info!("Render command buffer queue resumed");
    }

    /// Number of recycled load and unload commands waiting to be
    /// re-emitted.
    pub fn recycled_counts(&self) -> (usize, usize) {
        let recycled = self.recycled.lock();
        (recycled.loads.len(), recycled.unloads.len())
    }

    fn recycle(&self, buffer: RenderCommandBuffer) {
        let mut recycled = self.recycled.lock();
        for command in buffer.into_commands() {
            if command.is_load() {
                recycled.loads.push(command);
            } else if command.is_unload() {
                recycled.unloads.push(command);
            }
        }
    }
}

impl RenderSnapshotSystem for RenderCommandBufferManager {
    fn on_render_snapshot(&self, target_type: TargetType, snapshot: &mut RenderSnapshot) {
        if target_type != TargetType::Main || self.is_suspended() {
            return;
        }

        let RecycledCommands { loads, unloads } = std::mem::take(&mut *self.recycled.lock());
        if loads.is_empty() && unloads.is_empty() {
            return;
        }
        log::debug!(
            "Re-emitting {} recycled loads and {} recycled unloads",
            loads.len(),
            unloads.len()
        );
        snapshot.pre_render_command_list().extend(loads);
        snapshot.post_render_command_list().extend(unloads);
    }
}

impl Default for RenderCommandBufferManager {
    fn default() -> Self {
        Self::new(CommandBufferQueueConfig::default())
    }
}

static_assertions::assert_impl_all!(RenderCommandBufferManager: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;
    use crate::command::RenderCommandList;
    use crate::config::RenderResourceConfig;
    use crate::mesh::RenderMeshManager;
    use crate::shader::RenderShaderManager;
    use crate::test_utils::{quad_mesh_desc, test_snapshot};
    use chilli_core::colour::Colour;
    use chilli_core::math::UVec2;

    fn scene_buffer() -> RenderCommandBuffer {
        let mut list = RenderCommandList::new();
        list.add_begin_command(UVec2::new(4, 4), Colour::BLACK);
        list.add_end_command();
        RenderCommandBuffer::from_slots(vec![list])
    }

    /// A buffer carrying a mesh load and unload, as the compiler would
    /// produce after a create and destroy in the same frame.
    fn resource_buffer(meshes: &RenderMeshManager) -> RenderCommandBuffer {
        let mesh = meshes.create_render_mesh_from_desc(quad_mesh_desc()).unwrap();
        meshes.destroy_render_mesh(mesh);
        let mut snapshot = test_snapshot();
        meshes.on_render_snapshot(TargetType::Main, &mut snapshot);
        let mut buffer = RenderCommandBuffer::new();
        buffer.push_slot(snapshot.claim_pre_render_command_list());
        buffer.append(scene_buffer());
        buffer.push_slot(snapshot.claim_post_render_command_list());
        buffer
    }

    #[test]
    fn test_fifo_order() {
        let queue = RenderCommandBufferManager::new(
            CommandBufferQueueConfig::default().with_max_queued_buffers(2),
        );
        let mut first = scene_buffer();
        first.push_slot(RenderCommandList::new());
        queue.wait_then_push(first);
        queue.wait_then_push(scene_buffer());
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.wait_then_pop().slots().len(), 2);
        assert_eq!(queue.wait_then_pop().slots().len(), 1);
        assert!(queue.try_pop().is_none());
    }

    #[test]
    fn test_push_blocks_while_full() {
        let queue = Arc::new(RenderCommandBufferManager::default());
        queue.wait_then_push(scene_buffer());

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_then_push(scene_buffer()))
        };
        thread::sleep(Duration::from_millis(50));
        assert_eq!(queue.len(), 1);
        assert!(!producer.is_finished());

        let _ = queue.wait_then_pop();
        producer.join().unwrap();
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn test_pop_timeout_on_empty_queue() {
        let queue = RenderCommandBufferManager::default();
        assert!(queue.wait_then_pop_timeout(Duration::from_millis(10)).is_none());
        queue.wait_then_push(scene_buffer());
        assert!(queue.wait_then_pop_timeout(Duration::from_millis(10)).is_some());
    }

    #[test]
    fn test_suspend_recycles_resource_commands() {
        let meshes = RenderMeshManager::new(&RenderResourceConfig::default());
        let queue = RenderCommandBufferManager::default();
        queue.wait_then_push(resource_buffer(&meshes));

        queue.suspend();
        assert!(queue.is_empty());
        assert_eq!(queue.recycled_counts(), (1, 1));

        // Nothing is re-emitted while suspended.
        let mut snapshot = test_snapshot();
        queue.on_render_snapshot(TargetType::Main, &mut snapshot);
        assert!(snapshot.claim_pre_render_command_list().is_empty());

        queue.resume();
        let mut snapshot = test_snapshot();
        queue.on_render_snapshot(TargetType::Offscreen, &mut snapshot);
        assert_eq!(queue.recycled_counts(), (1, 1));
        queue.on_render_snapshot(TargetType::Main, &mut snapshot);
        assert_eq!(queue.recycled_counts(), (0, 0));

        let pre = snapshot.claim_pre_render_command_list();
        let post = snapshot.claim_post_render_command_list();
        assert!(matches!(pre.commands(), [RenderCommand::LoadMesh { .. }]));
        assert!(matches!(post.commands(), [RenderCommand::UnloadMesh { .. }]));
    }

    #[test]
    fn test_push_while_suspended_is_recycled() {
        let meshes = RenderMeshManager::new(&RenderResourceConfig::default());
        let queue = RenderCommandBufferManager::default();
        queue.suspend();
        queue.wait_then_push(resource_buffer(&meshes));
        assert!(queue.is_empty());
        assert_eq!(queue.recycled_counts(), (1, 1));
    }

    #[test]
    fn test_suspend_recycles_shader_commands() {
        let shaders = RenderShaderManager::new(&RenderResourceConfig::default());
        let shader = shaders.create_render_shader("flat", "vs", "fs").unwrap();
        let mut snapshot = test_snapshot();
        shaders.on_render_snapshot(TargetType::Main, &mut snapshot);

        let queue = RenderCommandBufferManager::default();
        queue.suspend();
        queue.wait_then_push(RenderCommandBuffer::from_slots(vec![
            snapshot.claim_pre_render_command_list(),
        ]));
        assert_eq!(queue.recycled_counts(), (1, 0));

        queue.resume();
        let mut snapshot = test_snapshot();
        queue.on_render_snapshot(TargetType::Main, &mut snapshot);
        match snapshot.claim_pre_render_command_list().commands() {
            [RenderCommand::LoadShader { shader: loaded, .. }] => {
                assert_eq!(*loaded, shader.to_ref())
            }
            other => panic!("unexpected commands {other:?}"),
        }
    }

    #[test]
    fn test_suspend_wakes_blocked_producer() {
        let queue = Arc::new(RenderCommandBufferManager::default());
        queue.wait_then_push(scene_buffer());

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_then_push(scene_buffer()))
        };
        thread::sleep(Duration::from_millis(20));
        queue.suspend();
        producer.join().unwrap();
        assert!(queue.is_empty());
    }

    #[test]
    #[should_panic(expected = "at least one buffer")]
    fn test_zero_capacity_panics() {
        let _ = RenderCommandBufferManager::new(
            CommandBufferQueueConfig::default().with_max_queued_buffers(0),
        );
    }
}
