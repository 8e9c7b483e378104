use criterion::{criterion_group, criterion_main, Criterion};
use traduko::grammar::Sentence;
use traduko::language::{Class, Context, Kind, Language, Manager, Statement, Tactic};
use traduko::proof::{Antecedent, Proof};
use traduko::rules::Rule;
use traduko::Error;

/// Prove `A1 AND (A2 AND ... An)` from premises `A1`, ..., `An`.
fn conjunctions(n: usize) -> Result<Proof, Error> {
    let atom = |i| Sentence::parse(&format!("A{}", i));
    let mut proof = Proof::new(atom(0)?);
    for i in 0..n {
        let path = proof.insert_child(atom(i)?, &[])?;
        proof.justify(&path, Rule::Premise.into())?;
    }
    let mut last = vec![n - 1];
    for i in (1..n - 1).rev() {
        let ants = vec![Antecedent::Path(vec![i]), Antecedent::Path(last)];
        last = proof.insert_with_rule(&[], Rule::Adjunction, ants, Vec::new())?;
    }
    let sentences = [proof.get(&[0])?.sentence.clone(), proof.get(&last)?.sentence.clone()];
    if let Some(conclusion) = Rule::Adjunction.apply(&sentences, &[])? {
        proof.set_sentence(&[], conclusion)?;
    }
    let ants = vec![Antecedent::Path(vec![0]), Antecedent::Path(last)];
    proof.justify(&[], (Rule::Adjunction, ants).into())?;
    Ok(proof)
}

fn sandwich() -> Result<Manager, Error> {
    let mut m = Manager::new("sandwich");
    m.add_hypothesis("$a_n, b_n, c_n$ are real-valued sequences")?;
    m.add_hypothesis(r"$l \in \mathbb{R}$")?;
    m.add_hypothesis(r"$a_n \rightarrow l$")?;
    m.add_hypothesis(r"$c_n \rightarrow l$")?;
    m.add_hypothesis(r"$\forall n : a_n \leq b_n$")?;
    m.add_hypothesis(r"$\forall n : b_n \leq c_n$")?;
    m.set_initial_goal(r"$b_n \rightarrow l$")?;
    m.add_proof_line(r"Let $\epsilon$")?;
    m.add_proof_line(r"Let's choose $N_a$ such that H1 uses $\epsilon$")?;
    m.add_proof_line(r"Let's choose $N_c$ such that H2 uses $\epsilon$")?;
    m.add_proof_line(r"Let $N = \max\left(N_a, N_c\right)$")?;
    m.add_proof_line("We claim $N$ works")?;
    m.add_proof_line(r"By inequality properties, $N_a \leq N$")?;
    Ok(m)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let proof = conjunctions(50).unwrap();

    let mut ctx = Context::new();
    ctx.add("a", Class::Sequence);
    ctx.add("b", Class::Sequence);
    let goal = r"$\exists N : \forall n \geq N : \left\lvert b_n - l\right\rvert < \epsilon$";

    c.bench_function("check", |b| b.iter(|| assert!(proof.check_proof(&[]))));
    c.bench_function("build", |b| b.iter(|| conjunctions(50).unwrap()));
    c.bench_function("goal", |b| {
        b.iter(|| Kind::Exists.natural(goal, &mut ctx.clone(), false).unwrap())
    });
    c.bench_function("tactic", |b| {
        b.iter(|| Tactic::from_lean("have A1 : a n ≤ b n := H1 n", &mut ctx.clone()).unwrap())
    });
    c.bench_function("statement", |b| {
        b.iter(|| Statement::from_natural(goal, &mut ctx.clone()).unwrap())
    });
    c.bench_function("sandwich", |b| b.iter(|| sandwich().unwrap().render().unwrap()));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
